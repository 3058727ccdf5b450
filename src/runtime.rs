//! Background texture decoding on a small rayon pool.
use std::path::PathBuf;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use thiserror::Error;
use voxpaint_textures::{DecodeError, TextureAsset};

#[derive(Debug, Error)]
pub enum TextureLoadError {
    #[error("reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[derive(Clone, Debug)]
pub struct DecodeJob {
    pub name: String,
    pub path: PathBuf,
    pub size: u32,
    /// Store epoch at submission.
    pub epoch: u64,
}

pub struct DecodeOut {
    pub name: String,
    pub epoch: u64,
    pub result: Result<TextureAsset, TextureLoadError>,
}

fn process_decode_job(job: DecodeJob) -> DecodeOut {
    let DecodeJob {
        name,
        path,
        size,
        epoch,
    } = job;
    let result = std::fs::read(&path)
        .map_err(|source| TextureLoadError::Read {
            path: path.clone(),
            source,
        })
        .and_then(|bytes| {
            TextureAsset::decode(name.as_str(), &bytes, size).map_err(TextureLoadError::from)
        });
    DecodeOut {
        name,
        epoch,
        result,
    }
}

pub struct Runtime {
    job_tx: Sender<DecodeJob>,
    res_rx: Receiver<DecodeOut>,
    inflight: usize,
    _pool: ThreadPool,
}

impl Runtime {
    pub fn new(workers: usize) -> Result<Self, ThreadPoolBuildError> {
        let (job_tx, job_rx) = unbounded::<DecodeJob>();
        let (res_tx, res_rx) = unbounded::<DecodeOut>();
        let workers = workers.max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("voxpaint-decode-{i}"))
            .build()?;
        for _ in 0..workers {
            let rx = job_rx.clone();
            let tx = res_tx.clone();
            pool.spawn(move || {
                while let Ok(job) = rx.recv() {
                    log::debug!("decoding '{}' from {}", job.name, job.path.display());
                    if tx.send(process_decode_job(job)).is_err() {
                        break;
                    }
                }
            });
        }
        Ok(Self {
            job_tx,
            res_rx,
            inflight: 0,
            _pool: pool,
        })
    }

    pub fn submit_decode(&mut self, job: DecodeJob) {
        if self.job_tx.send(job).is_err() {
            log::warn!("decode workers are gone; job dropped");
            return;
        }
        self.inflight += 1;
    }

    pub fn drain_decode_results(&mut self) -> Vec<DecodeOut> {
        let out: Vec<DecodeOut> = self.res_rx.try_iter().collect();
        self.inflight = self.inflight.saturating_sub(out.len());
        out
    }

    /// Block for the next result, up to `timeout`.
    pub fn recv_decode_result(&mut self, timeout: Duration) -> Option<DecodeOut> {
        match self.res_rx.recv_timeout(timeout) {
            Ok(out) => {
                self.inflight = self.inflight.saturating_sub(1);
                Some(out)
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Jobs submitted whose result has not been collected yet.
    pub fn pending(&self) -> usize {
        self.inflight
    }
}
