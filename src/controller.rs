//! Interaction controller.
//!
//! Input handling is split in two:
//! - [`ControllerState::on_event`] is the state machine. It takes the current
//!   state by value and returns the next state plus an [`Effect`] describing
//!   what should happen to the records. It never touches the store.
//! - [`Controller`] owns the store, undo buffer and overlay set, runs the state
//!   machine for each event and carries out the effect. A mutation and its
//!   undo capture happen inside one call, so no other event can interleave.
//!
//! Arc mode is driven by shift-clicks:
//!
//! ```text
//! Idle --shift-click--> AwaitEnd --shift-click--> AwaitControl --shift-click--> Idle (+ arc)
//!   any state --plain click--> Idle (+ single placement)
//! ```

use std::path::Path;

use crate::arc::{ArcSpec, assign_arc};
use crate::config::LocalizerConfig;
use crate::display::{self, OverlaySet};
use crate::error::{LocalizerError, Result};
use crate::input::{Action, InputEvent, Key, Modifiers};
use crate::keybindings::KeyBindings;
use crate::model::{ImagePoint, Pixel};
use crate::slices::SliceStack;
use crate::store::AnnotationStore;
use crate::undo::{PriorValue, UndoBuffer, UndoEntry};

/// Progress through the three arc clicks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ArcStage {
    /// No arc in progress.
    #[default]
    Idle,
    /// Start point placed, waiting for the end point.
    AwaitEnd { start: ImagePoint },
    /// Start and end placed, waiting for the control point.
    AwaitControl { start: ImagePoint, end: ImagePoint },
}

impl ArcStage {
    pub fn is_active(&self) -> bool {
        !matches!(self, ArcStage::Idle)
    }

    /// Transient markers the shell shows while an arc is being built.
    pub fn markers(&self) -> Vec<ImagePoint> {
        match *self {
            ArcStage::Idle => Vec::new(),
            ArcStage::AwaitEnd { start } => vec![start],
            ArcStage::AwaitControl { start, end } => vec![start, end],
        }
    }
}

/// Cursor affordance shown while shift is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Arrow,
    Crosshair,
}

/// Limits the state machine needs to know about.
#[derive(Debug, Clone, Copy)]
pub struct Bounds<'a> {
    pub channel_count: u32,
    pub slice_count: usize,
    pub bindings: &'a KeyBindings,
}

/// What the controller must do after a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Nothing beyond the state change.
    None,
    /// Place `channel` at `position` on the active slice.
    PlaceSingle { channel: u32, position: ImagePoint },
    /// Sample `arc` into channels starting at `first_channel`.
    PlaceArc { arc: ArcSpec, first_channel: u32 },
    /// Revert the last mutation.
    Undo,
    /// The active slice moved; overlays need a refresh.
    SliceChanged,
}

/// All mutable interaction state, passed through each transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerState {
    /// Channel the next placement goes to (1-based).
    pub selected_channel: u32,
    /// 0-based position in the slice stack.
    pub slice_index: usize,
    pub arc: ArcStage,
    pub cursor: Cursor,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self {
            selected_channel: 1,
            slice_index: 0,
            arc: ArcStage::Idle,
            cursor: Cursor::Arrow,
        }
    }
}

impl ControllerState {
    /// Run one event through the state machine.
    pub fn on_event(self, event: InputEvent, bounds: Bounds<'_>) -> (Self, Effect) {
        match event {
            InputEvent::Click {
                position,
                modifiers,
            } => {
                if modifiers.shift {
                    self.on_shift_click(position)
                } else {
                    self.on_click(position, bounds)
                }
            }
            InputEvent::KeyPressed { key, modifiers } => self.on_key(key, modifiers, bounds),
            InputEvent::KeyReleased {
                key: Key::Shift, ..
            } => (
                Self {
                    cursor: Cursor::Arrow,
                    ..self
                },
                Effect::None,
            ),
            InputEvent::KeyReleased { .. } => (self, Effect::None),
        }
    }

    fn on_click(self, position: ImagePoint, bounds: Bounds<'_>) -> (Self, Effect) {
        if self.arc.is_active() {
            log::debug!("Arc cancelled by plain click");
        }
        let channel = self.selected_channel;
        let next = Self {
            selected_channel: next_channel(channel, bounds.channel_count),
            arc: ArcStage::Idle,
            ..self
        };
        (next, Effect::PlaceSingle { channel, position })
    }

    fn on_shift_click(self, position: ImagePoint) -> (Self, Effect) {
        match self.arc {
            ArcStage::Idle => {
                log::debug!("Arc start at ({:.1}, {:.1})", position.x, position.y);
                (
                    Self {
                        arc: ArcStage::AwaitEnd { start: position },
                        ..self
                    },
                    Effect::None,
                )
            }
            ArcStage::AwaitEnd { start } => {
                log::debug!("Arc end at ({:.1}, {:.1})", position.x, position.y);
                (
                    Self {
                        arc: ArcStage::AwaitControl {
                            start,
                            end: position,
                        },
                        ..self
                    },
                    Effect::None,
                )
            }
            ArcStage::AwaitControl { start, end } => {
                log::debug!("Arc control at ({:.1}, {:.1})", position.x, position.y);
                (
                    Self {
                        arc: ArcStage::Idle,
                        ..self
                    },
                    Effect::PlaceArc {
                        arc: ArcSpec::new(start, end, position),
                        first_channel: self.selected_channel,
                    },
                )
            }
        }
    }

    fn on_key(self, key: Key, modifiers: Modifiers, bounds: Bounds<'_>) -> (Self, Effect) {
        if key == Key::Shift {
            return (
                Self {
                    cursor: Cursor::Crosshair,
                    ..self
                },
                Effect::None,
            );
        }

        let Some(action) = bounds.bindings.action_for(key, modifiers) else {
            return (self, Effect::None);
        };

        match action {
            Action::NextSlice => {
                let last = bounds.slice_count.saturating_sub(1);
                self.move_slice((self.slice_index + 1).min(last))
            }
            Action::PreviousSlice => self.move_slice(self.slice_index.saturating_sub(1)),
            Action::NextChannel => (
                Self {
                    selected_channel: next_channel(self.selected_channel, bounds.channel_count),
                    ..self
                },
                Effect::None,
            ),
            Action::PreviousChannel => (
                Self {
                    selected_channel: previous_channel(
                        self.selected_channel,
                        bounds.channel_count,
                    ),
                    ..self
                },
                Effect::None,
            ),
            Action::Undo => (self, Effect::Undo),
        }
    }

    fn move_slice(self, slice_index: usize) -> (Self, Effect) {
        if slice_index == self.slice_index {
            return (self, Effect::None);
        }
        (
            Self {
                slice_index,
                ..self
            },
            Effect::SliceChanged,
        )
    }
}

/// `channel + 1`, wrapping from `count` to 1.
pub fn next_channel(channel: u32, count: u32) -> u32 {
    channel % count + 1
}

/// `channel - 1`, wrapping from 1 to `count`.
pub fn previous_channel(channel: u32, count: u32) -> u32 {
    if channel <= 1 { count } else { channel - 1 }
}

/// What the shell has to redraw after an event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    /// Channels whose overlay changed (shown, hidden or moved).
    pub changed_channels: Vec<u32>,
    /// The active slice changed; load the new image.
    pub slice_changed: bool,
    /// The transient arc markers changed.
    pub arc_changed: bool,
    /// The cursor affordance changed.
    pub cursor_changed: bool,
    /// Channels reverted by undo, with the placement they now hold.
    pub undone: Vec<PriorValue>,
}

/// One localization session.
pub struct Controller {
    config: LocalizerConfig,
    slices: SliceStack,
    store: AnnotationStore,
    undo: UndoBuffer,
    state: ControllerState,
    overlays: OverlaySet,
}

impl Controller {
    /// Validate `config` and start a session on `slices`.
    pub fn new(config: LocalizerConfig, slices: SliceStack) -> Result<Self> {
        config.validate()?;
        let store = AnnotationStore::new(&config.channel_map()?);
        let state = ControllerState::default();
        let overlays = display::refresh(&store, slices.slice_id(state.slice_index));

        log::info!(
            "Session started: {} channels, {} per arc, {} slices",
            config.num_channels,
            config.num_channels_per_arc,
            slices.len()
        );

        Ok(Self {
            config,
            slices,
            store,
            undo: UndoBuffer::new(),
            state,
            overlays,
        })
    }

    /// Handle one input event to completion.
    pub fn handle_event(&mut self, event: InputEvent) -> Result<Response> {
        let bounds = Bounds {
            channel_count: self.store.channel_count(),
            slice_count: self.slices.len(),
            bindings: &self.config.keybindings,
        };
        let (next, effect) = self.state.on_event(event, bounds);
        let previous = std::mem::replace(&mut self.state, next);

        let mut response = Response {
            arc_changed: previous.arc != next.arc,
            cursor_changed: previous.cursor != next.cursor,
            ..Response::default()
        };

        match effect {
            Effect::None => {}
            Effect::PlaceSingle { channel, position } => {
                self.place_single(channel, position)?;
            }
            Effect::PlaceArc { arc, first_channel } => {
                self.place_arc(&arc, first_channel)?;
            }
            Effect::Undo => {
                response.undone = self.undo.pop_and_apply(&mut self.store);
            }
            Effect::SliceChanged => {
                response.slice_changed = true;
                log::debug!(
                    "Slice {} ({}/{})",
                    self.active_slice_id(),
                    self.state.slice_index + 1,
                    self.slices.len()
                );
            }
        }

        if previous.selected_channel != next.selected_channel {
            log::debug!("Selected channel {}", next.selected_channel);
        }

        if effect != Effect::None {
            response.changed_channels = self.sync_overlays();
        }
        Ok(response)
    }

    /// Handle a sequence of events, stopping at the first error.
    pub fn replay(&mut self, events: &[InputEvent]) -> Result<()> {
        for event in events {
            self.handle_event(*event)?;
        }
        Ok(())
    }

    fn place_single(&mut self, channel: u32, position: ImagePoint) -> Result<()> {
        let slice = self.active_slice_id();
        let prior = self
            .store
            .set_single(channel, slice, Pixel::from(position))?;
        self.undo
            .record(UndoEntry::new(vec![PriorValue::new(channel, prior)]));
        Ok(())
    }

    fn place_arc(&mut self, arc: &ArcSpec, first_channel: u32) -> Result<()> {
        let assignments = assign_arc(
            arc,
            self.config.num_channels_per_arc,
            first_channel,
            self.store.channel_count(),
            self.active_slice_id(),
        );
        if assignments.is_empty() {
            return Ok(());
        }
        let priors = self.store.set_batch(&assignments)?;
        self.undo.record(UndoEntry::new(priors));
        Ok(())
    }

    /// Recompute overlays for the active slice; returns changed channels.
    fn sync_overlays(&mut self) -> Vec<u32> {
        let fresh = display::refresh(&self.store, self.active_slice_id());
        let changed = self.overlays.changed_channels(&fresh);
        self.overlays = fresh;
        changed
    }

    /// Jump straight to a channel.
    pub fn select_channel(&mut self, channel: u32) -> Result<()> {
        if self.store.get(channel).is_none() {
            return Err(LocalizerError::channel_out_of_range(
                channel,
                self.store.channel_count(),
            ));
        }
        self.state.selected_channel = channel;
        Ok(())
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn overlays(&self) -> &OverlaySet {
        &self.overlays
    }

    pub fn slices(&self) -> &SliceStack {
        &self.slices
    }

    pub fn config(&self) -> &LocalizerConfig {
        &self.config
    }

    pub fn selected_channel(&self) -> u32 {
        self.state.selected_channel
    }

    /// Slice id records placed now would carry.
    pub fn active_slice_id(&self) -> u32 {
        self.slices.slice_id(self.state.slice_index)
    }

    /// Image the shell should display.
    pub fn active_slice_path(&self) -> Option<&Path> {
        self.slices.path(self.state.slice_index)
    }

    /// Points collected for an in-progress arc.
    pub fn arc_markers(&self) -> Vec<ImagePoint> {
        self.state.arc.markers()
    }

    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    /// Placed and total channel counts.
    pub fn progress(&self) -> (usize, usize) {
        (self.store.placed_count(), self.store.records().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Placement;
    use crate::slices::SliceOffset;
    use std::path::PathBuf;

    fn stack(count: usize, offset: u32) -> SliceStack {
        let paths = (1..=count)
            .map(|i| PathBuf::from(format!("slice{}.png", i)))
            .collect();
        SliceStack::from_paths(paths, SliceOffset::Fixed(offset)).unwrap()
    }

    fn controller(channels: u32, per_arc: u32) -> Controller {
        Controller::new(LocalizerConfig::with_channels(channels, per_arc), stack(3, 4)).unwrap()
    }

    fn ctrl_z() -> InputEvent {
        InputEvent::KeyPressed {
            key: Key::Char('z'),
            modifiers: Modifiers::CTRL,
        }
    }

    #[test]
    fn test_channel_wrapping() {
        assert_eq!(next_channel(1, 4), 2);
        assert_eq!(next_channel(4, 4), 1);
        assert_eq!(previous_channel(1, 4), 4);
        assert_eq!(previous_channel(3, 4), 2);
        assert_eq!(next_channel(1, 1), 1);
    }

    #[test]
    fn test_shift_clicks_walk_arc_stages() {
        let bindings = KeyBindings::default();
        let bounds = Bounds {
            channel_count: 8,
            slice_count: 1,
            bindings: &bindings,
        };
        let state = ControllerState::default();

        let (state, effect) = state.on_event(InputEvent::shift_click(0.0, 0.0), bounds);
        assert_eq!(effect, Effect::None);
        assert!(matches!(state.arc, ArcStage::AwaitEnd { .. }));

        let (state, effect) = state.on_event(InputEvent::shift_click(10.0, 0.0), bounds);
        assert_eq!(effect, Effect::None);
        assert_eq!(state.arc.markers().len(), 2);

        let (state, effect) = state.on_event(InputEvent::shift_click(5.0, 10.0), bounds);
        assert_eq!(state.arc, ArcStage::Idle);
        assert_eq!(
            effect,
            Effect::PlaceArc {
                arc: ArcSpec::new(
                    ImagePoint::new(0.0, 0.0),
                    ImagePoint::new(10.0, 0.0),
                    ImagePoint::new(5.0, 10.0)
                ),
                first_channel: 1,
            }
        );
        assert_eq!(state.selected_channel, 1, "arc keeps the selection");
    }

    #[test]
    fn test_shift_key_only_toggles_cursor() {
        let mut controller = controller(4, 2);
        controller.handle_event(InputEvent::shift_click(1.0, 1.0)).unwrap();

        let response = controller.handle_event(InputEvent::key(Key::Shift)).unwrap();
        assert!(response.cursor_changed);
        assert_eq!(controller.state().cursor, Cursor::Crosshair);
        assert!(controller.state().arc.is_active());

        let response = controller
            .handle_event(InputEvent::KeyReleased {
                key: Key::Shift,
                modifiers: Modifiers::default(),
            })
            .unwrap();
        assert!(response.cursor_changed);
        assert_eq!(controller.state().cursor, Cursor::Arrow);
        assert_eq!(controller.arc_markers().len(), 1);
    }

    #[test]
    fn test_single_click_places_and_advances() {
        let mut controller = controller(4, 2);
        controller.select_channel(4).unwrap();

        let response = controller.handle_event(InputEvent::click(10.4, 19.6)).unwrap();
        assert_eq!(response.changed_channels, vec![4]);

        let record = controller.store().get(4).unwrap();
        assert_eq!(record.original_channel, 4);
        assert_eq!(record.mapped_channel, 4);
        assert_eq!(record.placement, Placement::at(5, Pixel::new(10, 20)));
        assert_eq!(controller.selected_channel(), 1, "wraps from N to 1");
        assert!(controller.overlays().is_visible(4));
    }

    #[test]
    fn test_plain_click_cancels_arc() {
        let mut controller = controller(4, 2);
        controller.handle_event(InputEvent::shift_click(0.0, 0.0)).unwrap();
        controller.handle_event(InputEvent::shift_click(5.0, 0.0)).unwrap();

        let response = controller.handle_event(InputEvent::click(3.0, 3.0)).unwrap();
        assert!(response.arc_changed);
        assert!(controller.arc_markers().is_empty());
        assert_eq!(controller.progress(), (1, 4));

        // The next shift-click starts a fresh arc
        controller.handle_event(InputEvent::shift_click(1.0, 1.0)).unwrap();
        assert!(matches!(controller.state().arc, ArcStage::AwaitEnd { .. }));
    }

    #[test]
    fn test_slice_navigation_clamps() {
        let mut controller = controller(4, 2);
        assert_eq!(controller.active_slice_id(), 5);

        let response = controller.handle_event(InputEvent::key(Key::Left)).unwrap();
        assert!(!response.slice_changed);
        assert_eq!(controller.state().slice_index, 0);

        controller.handle_event(InputEvent::key(Key::Right)).unwrap();
        let response = controller.handle_event(InputEvent::key(Key::Right)).unwrap();
        assert!(response.slice_changed);
        assert_eq!(controller.active_slice_id(), 7);
        assert_eq!(controller.active_slice_path(), Some(Path::new("slice3.png")));

        let response = controller.handle_event(InputEvent::key(Key::Right)).unwrap();
        assert!(!response.slice_changed);
        assert_eq!(controller.state().slice_index, 2);
    }

    #[test]
    fn test_channel_navigation_wraps() {
        let mut controller = controller(4, 2);
        controller.handle_event(InputEvent::key(Key::Down)).unwrap();
        assert_eq!(controller.selected_channel(), 4);
        controller.handle_event(InputEvent::key(Key::Up)).unwrap();
        assert_eq!(controller.selected_channel(), 1);
    }

    #[test]
    fn test_slice_change_refreshes_overlays() {
        let mut controller = controller(4, 2);
        controller.handle_event(InputEvent::click(1.0, 1.0)).unwrap();
        assert!(controller.overlays().is_visible(1));

        let response = controller.handle_event(InputEvent::key(Key::Right)).unwrap();
        assert_eq!(response.changed_channels, vec![1]);
        assert!(!controller.overlays().is_visible(1));

        controller.handle_event(InputEvent::key(Key::Left)).unwrap();
        assert!(controller.overlays().is_visible(1));
    }

    #[test]
    fn test_arc_truncates_near_last_channel() {
        let mut controller = controller(4, 3);
        controller.select_channel(3).unwrap();
        for (x, y) in [(0.0, 0.0), (10.0, 0.0), (5.0, 5.0)] {
            controller.handle_event(InputEvent::shift_click(x, y)).unwrap();
        }
        assert!(controller.store().is_set(3));
        assert!(controller.store().is_set(4));
        assert_eq!(controller.progress(), (2, 4));
    }

    #[test]
    fn test_undo_single_and_noop() {
        let mut controller = controller(4, 2);
        controller.handle_event(InputEvent::click(1.0, 1.0)).unwrap();
        controller.handle_event(InputEvent::key(Key::Right)).unwrap();
        controller.handle_event(InputEvent::click(2.0, 2.0)).unwrap();
        assert!(controller.can_undo());

        let response = controller.handle_event(ctrl_z()).unwrap();
        assert_eq!(response.undone, vec![PriorValue::new(2, Placement::UNSET)]);
        assert!(!controller.store().is_set(2));
        assert!(controller.store().is_set(1));
        assert!(!controller.overlays().is_visible(2));

        let response = controller.handle_event(ctrl_z()).unwrap();
        assert!(response.undone.is_empty());
        assert!(controller.store().is_set(1));
    }

    #[test]
    fn test_undo_restores_overwritten_placement() {
        let mut controller = controller(2, 2);
        controller.handle_event(InputEvent::click(1.0, 1.0)).unwrap();
        controller.handle_event(InputEvent::key(Key::Up)).unwrap();
        controller.handle_event(InputEvent::click(9.0, 9.0)).unwrap();
        assert_eq!(controller.store().get(1).unwrap().point(), Some(Pixel::new(9, 9)));

        controller.handle_event(ctrl_z()).unwrap();
        assert_eq!(controller.store().get(1).unwrap().point(), Some(Pixel::new(1, 1)));
        assert_eq!(controller.overlays().get(1).unwrap().position, Some(Pixel::new(1, 1)));
    }

    #[test]
    fn test_unbound_key_does_nothing() {
        let mut controller = controller(4, 2);
        let before = *controller.state();
        let response = controller.handle_event(InputEvent::key(Key::Char('q'))).unwrap();
        assert_eq!(response, Response::default());
        assert_eq!(*controller.state(), before);
    }

    #[test]
    fn test_select_channel_validates() {
        let mut controller = controller(4, 2);
        assert!(controller.select_channel(0).is_err());
        assert!(controller.select_channel(5).is_err());
        assert!(controller.select_channel(3).is_ok());
        assert_eq!(controller.selected_channel(), 3);
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let mut config = LocalizerConfig::with_channels(4, 2);
        config.channel_map = Some(vec![1, 2]);
        assert!(Controller::new(config, stack(1, 0)).is_err());
    }
}
