use std::time::{Duration, Instant};

use super::App;
use crate::command::Command;
use crate::render::RenderScene;
use crate::runtime::DecodeOut;

const MAX_COMMANDS_PER_STEP: usize = 20_000;

impl<S: RenderScene> App<S> {
    /// Advance one tick: pick up dropped files and finished decodes, then run
    /// every command scheduled for this tick.
    pub fn step(&mut self) {
        self.process_drop_events();
        for out in self.runtime.drain_decode_results() {
            self.apply_decode_result(out);
        }

        let mut processed = 0usize;
        while let Some(env) = self.queue.pop_ready() {
            self.handle_command(env);
            processed += 1;
            if processed >= MAX_COMMANDS_PER_STEP {
                log::warn!("command budget exhausted; {} carried over", self.queue.pending());
                break;
            }
        }
        self.cmd_processed_total = self.cmd_processed_total.saturating_add(processed);
        self.gs.tick = self.gs.tick.wrapping_add(1);
        self.queue.advance_tick();
    }

    /// Block until every submitted decode has come back (or `timeout`
    /// passes), then step once so the results land in the store. Returns the
    /// number of decodes still outstanding.
    pub fn wait_for_decodes(&mut self, timeout: Duration) -> usize {
        let deadline = Instant::now() + timeout;
        while self.runtime.pending() > 0 {
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() {
                break;
            }
            match self.runtime.recv_decode_result(left) {
                Some(out) => self.apply_decode_result(out),
                None => break,
            }
        }
        self.step();
        let left = self.runtime.pending();
        if left > 0 {
            log::warn!("{} texture decode(s) still pending after {:?}", left, timeout);
        }
        left
    }

    fn apply_decode_result(&mut self, out: DecodeOut) {
        match out.result {
            Ok(asset) => {
                self.queue.emit_now(Command::TextureDecoded {
                    asset: Box::new(asset),
                    epoch: out.epoch,
                });
            }
            Err(e) => log::warn!("texture '{}' not loaded: {}", out.name, e),
        }
    }
}
