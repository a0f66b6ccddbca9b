use rand::Rng;

/// An 8-bit RGBA color.
///
/// Leaf colors are sampled once at build time and kept for the leaf's
/// lifetime; nothing in the per-frame passes touches them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fully opaque color from its red, green and blue channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Samples a color channel-wise between two bounds.
    ///
    /// Each of R, G and B is drawn uniformly between the matching
    /// channels of `low` and `high` (each `low` channel must not exceed
    /// its `high` counterpart) and floored to an integer. Alpha is always
    /// fully opaque.
    pub fn random_between(low: Rgba, high: Rgba, rng: &mut impl Rng) -> Self {
        fn channel(lo: u8, hi: u8, rng: &mut impl Rng) -> u8 {
            rng.random_range(lo as f32..=hi as f32) as u8
        }

        Self {
            r: channel(low.r, high.r, rng),
            g: channel(low.g, high.g, rng),
            b: channel(low.b, high.b, rng),
            a: 255,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn random_between_stays_within_channel_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let low = Rgba::rgb(0, 150, 0);
        let high = Rgba::rgb(255, 200, 0);

        for _ in 0..100 {
            let c = Rgba::random_between(low, high, &mut rng);
            assert!(c.g >= 150 && c.g <= 200, "green out of range: {}", c.g);
            // Zero-width blue channel must stay constant.
            assert_eq!(c.b, 0);
            assert_eq!(c.a, 255);
        }
    }

    #[test]
    fn equal_bounds_yield_that_exact_color() {
        let mut rng = StdRng::seed_from_u64(7);
        let bound = Rgba::rgb(12, 34, 56);

        let c = Rgba::random_between(bound, bound, &mut rng);
        assert_eq!(c, bound);
    }

    #[test]
    fn rgb_is_fully_opaque() {
        assert_eq!(Rgba::rgb(1, 2, 3).a, 255);
    }
}
