use glam::Vec2;

/// Latest pointer position in normalized device coordinates, +Y up.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub ndc: Vec2,
}

impl PointerState {
    /// Record a client-space position (mouse move or first touch).
    pub fn set_client(&mut self, client_x: f32, client_y: f32, width: f32, height: f32) {
        self.ndc = client_to_ndc(client_x, client_y, width, height);
    }
}

/// Map client pixels to [-1, 1]^2; a degenerate viewport maps to the center.
#[inline]
pub fn client_to_ndc(client_x: f32, client_y: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    let x = (client_x / width) * 2.0 - 1.0;
    let y = -(client_y / height) * 2.0 + 1.0;
    Vec2::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0))
}
