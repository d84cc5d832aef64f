use eddy_fluids::stable::StableFluid;
use glam::{IVec2, Vec2};

/// Turns pointer motion over the interior into density and velocity stimulus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    /// Half-width of the square neighbourhood splatted around the pointer.
    pub radius: i32,
    /// Velocity added per cell of pointer motion.
    pub strength: f32,
    /// Velocity scale for the neighbourhood relative to the pointer cell.
    pub falloff: f32,
}

impl Brush {
    pub const MOUSE: Brush = Brush {
        radius: 1,
        strength: 0.5,
        falloff: 0.5,
    };

    pub const TOUCH: Brush = Brush {
        radius: 2,
        strength: 0.8,
        falloff: 0.7,
    };

    /// Applies a pointer move from `from` to `to`, both 0-based interior cells.
    ///
    /// Nothing is added when `to` is outside the interior. Returns whether the
    /// stroke touched the fluid.
    pub fn stroke<const C: usize>(&self, fluid: &mut StableFluid<C>, from: IVec2, to: IVec2, color: [f32; C]) -> bool {
        let size = fluid.size().as_ivec2();
        let inside = |p: IVec2| p.cmpge(IVec2::ZERO).all() && p.cmplt(size).all();

        if !inside(to) {
            return false;
        }

        let velocity = (to - from).as_vec2() * self.strength;
        splat(fluid, to, color, velocity);

        for dx in -self.radius..=self.radius {
            for dy in -self.radius..=self.radius {
                let p = to + IVec2::new(dx, dy);
                if inside(p) {
                    splat(fluid, p, color, velocity * self.falloff);
                }
            }
        }

        true
    }
}

/// Shifts an interior cell into padded space and adds stimulus there.
fn splat<const C: usize>(fluid: &mut StableFluid<C>, p: IVec2, color: [f32; C], velocity: Vec2) {
    let x = p.x as usize + 1;
    let y = p.y as usize + 1;

    fluid.add_density(x, y, color);
    fluid.add_velocity(x, y, velocity.x, velocity.y);
}
