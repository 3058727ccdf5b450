use std::collections::{BTreeMap, VecDeque};

use voxpaint_textures::TextureAsset;
use voxpaint_world::VoxelCoord;

use crate::camera::MoveInput;
use crate::input::{PointerButton, Selection};

pub enum Command {
    // Input-derived intents
    PointerClicked { button: PointerButton, sx: f32, sy: f32 },
    LookRequested { dx: f32, dy: f32 },
    MovementRequested { input: MoveInput, dt: f32 },
    SelectionChanged { selection: Selection },
    ParameterChanged { key: String, value: String },

    // World edits
    PlaceAt { coord: VoxelCoord, texture: String },
    RemoveAt { coord: VoxelCoord },

    // Textures
    TextureDecoded { asset: Box<TextureAsset>, epoch: u64 },
}

impl Command {
    pub fn label(&self) -> &'static str {
        match self {
            Command::PointerClicked { .. } => "PointerClicked",
            Command::LookRequested { .. } => "LookRequested",
            Command::MovementRequested { .. } => "MovementRequested",
            Command::SelectionChanged { .. } => "SelectionChanged",
            Command::ParameterChanged { .. } => "ParameterChanged",
            Command::PlaceAt { .. } => "PlaceAt",
            Command::RemoveAt { .. } => "RemoveAt",
            Command::TextureDecoded { .. } => "TextureDecoded",
        }
    }
}

pub struct CommandEnvelope {
    pub id: u64,
    pub tick: u64,
    pub kind: Command,
}

pub struct CommandQueue {
    // map of tick -> FIFO queue of commands
    by_tick: BTreeMap<u64, VecDeque<CommandEnvelope>>,
    pub now: u64,
    next_id: u64,
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self {
            by_tick: BTreeMap::new(),
            now: 0,
            next_id: 1,
        }
    }
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    pub fn emit_now(&mut self, kind: Command) -> u64 {
        self.emit_at(self.now, kind)
    }

    fn emit_at(&mut self, tick: u64, kind: Command) -> u64 {
        let id = self.alloc_id();
        let tick = tick.max(self.now);
        let env = CommandEnvelope { id, tick, kind };
        self.by_tick.entry(tick).or_default().push_back(env);
        id
    }

    pub fn pop_ready(&mut self) -> Option<CommandEnvelope> {
        self.by_tick.get_mut(&self.now).and_then(|q| q.pop_front())
    }

    /// Commands left in the current tick carry over, ahead of anything
    /// already scheduled for the next one.
    pub fn advance_tick(&mut self) {
        let next = self.now.wrapping_add(1);
        if let Some(rest) = self.by_tick.remove(&self.now) {
            if !rest.is_empty() {
                let bucket = self.by_tick.entry(next).or_default();
                for mut env in rest.into_iter().rev() {
                    env.tick = next;
                    bucket.push_front(env);
                }
            }
        }
        self.now = next;
    }

    /// Commands waiting in the current or later ticks.
    pub fn pending(&self) -> usize {
        self.by_tick.values().map(VecDeque::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord_of(env: &CommandEnvelope) -> Option<VoxelCoord> {
        match env.kind {
            Command::RemoveAt { coord } => Some(coord),
            _ => None,
        }
    }

    #[test]
    fn fifo_within_tick() {
        let mut q = CommandQueue::new();
        q.emit_now(Command::RemoveAt { coord: VoxelCoord::new(1, 0, 0) });
        q.emit_now(Command::RemoveAt { coord: VoxelCoord::new(2, 0, 0) });
        assert_eq!(q.pending(), 2);
        assert_eq!(q.pop_ready().and_then(|e| coord_of(&e)), Some(VoxelCoord::new(1, 0, 0)));
        assert_eq!(q.pop_ready().and_then(|e| coord_of(&e)), Some(VoxelCoord::new(2, 0, 0)));
        assert!(q.pop_ready().is_none());
    }

    #[test]
    fn past_ticks_clamp_to_now_and_future_ones_wait() {
        let mut q = CommandQueue::new();
        q.advance_tick();
        q.emit_at(0, Command::RemoveAt { coord: VoxelCoord::new(1, 0, 0) });
        q.emit_at(3, Command::RemoveAt { coord: VoxelCoord::new(2, 0, 0) });
        let env = q.pop_ready().unwrap();
        assert_eq!(env.tick, 1);
        assert_eq!(env.kind.label(), "RemoveAt");
        assert!(q.pop_ready().is_none());
        q.advance_tick();
        assert!(q.pop_ready().is_none());
        q.advance_tick();
        assert_eq!(q.pop_ready().and_then(|e| coord_of(&e)), Some(VoxelCoord::new(2, 0, 0)));
        assert_eq!(q.pending(), 0);
    }

    #[test]
    fn leftovers_carry_into_next_tick_first() {
        let mut q = CommandQueue::new();
        q.emit_at(1, Command::RemoveAt { coord: VoxelCoord::new(9, 0, 0) });
        q.emit_now(Command::RemoveAt { coord: VoxelCoord::new(1, 0, 0) });
        q.emit_now(Command::RemoveAt { coord: VoxelCoord::new(2, 0, 0) });
        q.advance_tick();
        let order: Vec<i32> = std::iter::from_fn(|| q.pop_ready())
            .filter_map(|e| coord_of(&e))
            .map(|c| c.x)
            .collect();
        assert_eq!(order, vec![1, 2, 9]);
    }

    #[test]
    fn ids_are_unique_and_nonzero() {
        let mut q = CommandQueue::new();
        let a = q.emit_now(Command::RemoveAt { coord: VoxelCoord::new(0, 0, 0) });
        let b = q.emit_now(Command::RemoveAt { coord: VoxelCoord::new(0, 0, 0) });
        assert!(a != 0 && b != 0 && a != b);
    }
}
