//! Single-axis pan recognizer
//!
//! Turns raw pointer down/move/up into a pan along one axis. A pan only
//! activates once the pointer travels `slop` along its axis; moving further
//! across the axis first makes it fail, leaving the pointer to whichever
//! recognizer owns the other axis. A pointer that never activates or fails
//! is reported as a tap.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Split a displacement into (along, across) this axis.
    fn split(self, dx: f32, dy: f32) -> (f32, f32) {
        match self {
            Axis::Horizontal => (dx, dy),
            Axis::Vertical => (dy, dx),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum RecognizerState {
    #[default]
    Idle,
    Possible {
        origin: (f32, f32),
    },
    Active {
        origin: (f32, f32),
    },
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanEvent {
    /// Nothing to report
    None,
    /// The pan just activated; `translation` is measured from pointer down
    Began { translation: f32 },
    Changed { translation: f32 },
    Ended,
    /// The pan failed before activating
    Failed,
    /// Pointer released without activating or failing
    Tap { x: f32, y: f32 },
}

#[derive(Debug, Clone)]
pub struct PanRecognizer {
    axis: Axis,
    slop: f32,
    state: RecognizerState,
}

impl PanRecognizer {
    pub fn new(axis: Axis, slop: f32) -> Self {
        Self {
            axis,
            slop: slop.max(0.0),
            state: RecognizerState::Idle,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, RecognizerState::Active { .. })
    }

    /// True between pointer down and up, unless the pan failed
    pub fn is_tracking(&self) -> bool {
        matches!(
            self.state,
            RecognizerState::Possible { .. } | RecognizerState::Active { .. }
        )
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.state = RecognizerState::Possible { origin: (x, y) };
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> PanEvent {
        match self.state {
            RecognizerState::Possible { origin } => {
                let (along, across) = self.axis.split(x - origin.0, y - origin.1);
                if along.abs() > self.slop && along.abs() >= across.abs() {
                    self.state = RecognizerState::Active { origin };
                    PanEvent::Began { translation: along }
                } else if across.abs() > self.slop {
                    self.state = RecognizerState::Failed;
                    PanEvent::Failed
                } else {
                    PanEvent::None
                }
            }
            RecognizerState::Active { origin } => {
                let (along, _) = self.axis.split(x - origin.0, y - origin.1);
                PanEvent::Changed { translation: along }
            }
            RecognizerState::Idle | RecognizerState::Failed => PanEvent::None,
        }
    }

    pub fn pointer_up(&mut self) -> PanEvent {
        let event = match self.state {
            RecognizerState::Possible { origin } => PanEvent::Tap {
                x: origin.0,
                y: origin.1,
            },
            RecognizerState::Active { .. } => PanEvent::Ended,
            RecognizerState::Idle | RecognizerState::Failed => PanEvent::None,
        };
        self.state = RecognizerState::Idle;
        event
    }

    /// Stop tracking the current pointer. Returns true if the pan was active.
    pub fn fail(&mut self) -> bool {
        let was_active = self.is_active();
        self.state = if self.is_tracking() {
            RecognizerState::Failed
        } else {
            RecognizerState::Idle
        };
        was_active
    }
}
