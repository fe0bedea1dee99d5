//! Event types and sinks for observing garden mutations.
//!
//! This module defines [`GardenEvent`] and a set of sinks to emit, collect, or forward events
//! while executing [`crate::garden::GardenState::add_with_events`] or
//! [`crate::garden::GardenState::reset_with_events`].
use crate::catalog::ItemTypeId;
use crate::garden::{PlacedItem, PlacementResult};
use crate::grid::GridCell;

/// Describes events emitted by garden operations.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum GardenEvent {
    /// Emitted when a validated `add` request starts.
    AddStarted {
        item_type: ItemTypeId,
        requested: usize,
        /// Grid side before any growth.
        grid_size: usize,
    },

    /// Emitted when the grid grew to fit the request.
    GridExpanded {
        old_size: usize,
        new_size: usize,
        /// Shift applied to existing occupancy on both axes.
        offset: usize,
    },

    /// Emitted for every placed item.
    ItemPlaced {
        /// Index of the item in the garden's item list.
        index: usize,
        item: PlacedItem,
    },

    /// Emitted when randomized sampling failed and the exhaustive scan found the anchor.
    FallbackScanUsed { item_type: ItemTypeId, cell: GridCell },

    /// Emitted when the grid ran out of room before all requested items were placed.
    PlacementExhausted {
        item_type: ItemTypeId,
        requested: usize,
        placed: usize,
    },

    /// Emitted when an `add` request finishes.
    AddFinished { result: PlacementResult },

    /// Emitted when the garden is reset.
    Reset { previous_items: usize },
}

/// Discriminant of [`GardenEvent`], used by sinks to opt out of event construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GardenEventKind {
    AddStarted,
    GridExpanded,
    ItemPlaced,
    FallbackScanUsed,
    PlacementExhausted,
    AddFinished,
    Reset,
}

impl GardenEvent {
    pub fn kind(&self) -> GardenEventKind {
        match self {
            GardenEvent::AddStarted { .. } => GardenEventKind::AddStarted,
            GardenEvent::GridExpanded { .. } => GardenEventKind::GridExpanded,
            GardenEvent::ItemPlaced { .. } => GardenEventKind::ItemPlaced,
            GardenEvent::FallbackScanUsed { .. } => GardenEventKind::FallbackScanUsed,
            GardenEvent::PlacementExhausted { .. } => GardenEventKind::PlacementExhausted,
            GardenEvent::AddFinished { .. } => GardenEventKind::AddFinished,
            GardenEvent::Reset { .. } => GardenEventKind::Reset,
        }
    }
}

/// A generic event sink that accepts [`GardenEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: GardenEvent);

    /// Whether events of `kind` should be built and sent at all.
    #[inline]
    fn wants(&self, _kind: GardenEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: GardenEvent) {}

    #[inline]
    fn wants(&self, _kind: GardenEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(GardenEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(GardenEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(GardenEvent),
{
    #[inline]
    fn send(&mut self, event: GardenEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<GardenEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<GardenEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[GardenEvent] {
        &self.events
    }

    /// Number of collected events of `kind`.
    pub fn count(&self, kind: GardenEventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: GardenEvent) {
        self.events.push(event);
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn into_inner(self) -> Vec<S> {
        self.sinks
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: GardenEvent) {
        let Some(last_idx) = self.sinks.len().checked_sub(1) else {
            return;
        };
        let kind = event.kind();
        for sink in &mut self.sinks[..last_idx] {
            if sink.wants(kind) {
                sink.send(event.clone());
            }
        }
        if self.sinks[last_idx].wants(kind) {
            self.sinks[last_idx].send(event);
        }
    }

    fn wants(&self, kind: GardenEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}
