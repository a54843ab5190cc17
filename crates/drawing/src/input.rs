//! Input normalization
//!
//! Mouse and touch events arrive in client (page) coordinates. Both are
//! translated into [`PointerEvent`]s relative to the canvas origin, so
//! the surface handles a single stroke path.

/// A pointer event in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Stroke begins
    Down {
        /// Canvas x
        x: f32,
        /// Canvas y
        y: f32,
    },
    /// Pointer moved
    Move {
        /// Canvas x
        x: f32,
        /// Canvas y
        y: f32,
    },
    /// Stroke ends
    Up,
    /// Pointer left the canvas; ends the stroke
    Leave,
}

/// A client-space point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientPoint {
    /// Page x
    pub client_x: f32,
    /// Page y
    pub client_y: f32,
}

impl ClientPoint {
    /// Create a point
    pub fn new(client_x: f32, client_y: f32) -> Self {
        Self { client_x, client_y }
    }
}

/// Raw events as delivered by the host
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    /// Mouse button pressed
    MouseDown(ClientPoint),
    /// Mouse moved
    MouseMove(ClientPoint),
    /// Mouse button released
    MouseUp,
    /// Mouse left the canvas
    MouseLeave,
    /// Touch began; active touches in order
    TouchStart(Vec<ClientPoint>),
    /// Touch moved; active touches in order
    TouchMove(Vec<ClientPoint>),
    /// Touch ended
    TouchEnd,
}

/// Top-left corner of the canvas in client coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasOrigin {
    /// Client x of the canvas' left edge
    pub left: f32,
    /// Client y of the canvas' top edge
    pub top: f32,
}

impl CanvasOrigin {
    /// Create an origin
    pub fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }

    fn local(&self, point: ClientPoint) -> (f32, f32) {
        (point.client_x - self.left, point.client_y - self.top)
    }

    /// Translate a raw event; touch events use only the first touch point
    ///
    /// Returns `None` for touch events without any touch point.
    pub fn normalize(&self, input: &RawInput) -> Option<PointerEvent> {
        match input {
            RawInput::MouseDown(point) => {
                let (x, y) = self.local(*point);
                Some(PointerEvent::Down { x, y })
            }
            RawInput::MouseMove(point) => {
                let (x, y) = self.local(*point);
                Some(PointerEvent::Move { x, y })
            }
            RawInput::TouchStart(touches) => {
                let (x, y) = self.local(*touches.first()?);
                Some(PointerEvent::Down { x, y })
            }
            RawInput::TouchMove(touches) => {
                let (x, y) = self.local(*touches.first()?);
                Some(PointerEvent::Move { x, y })
            }
            RawInput::MouseUp | RawInput::TouchEnd => Some(PointerEvent::Up),
            RawInput::MouseLeave => Some(PointerEvent::Leave),
        }
    }
}
