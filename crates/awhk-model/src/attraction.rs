//! Attraction Rule
//!
//! The pure pairwise update: given the opinions of the sampled node and
//! its chosen neighbor plus the edge weight, produce the sampled node's
//! next opinion. Pairs farther apart than the confidence threshold do
//! not interact, and equal opinions stay put. The weighted sum
//! `s = a + b * w` drives four sign-dependent branches; the result is
//! not clamped to [-1, 1] here, out-of-range values are reset by the
//! sanitizer at the start of the next call.

/// Next opinion for a node holding `a` after interacting with a
/// neighbor holding `b` over an edge of weight `weight`.
pub fn attract(a: f64, b: f64, weight: f64, epsilon: f64) -> f64 {
    if (a - b).abs() > epsilon {
        return a;
    }
    let s = a + b * weight;

    if a >= 0.0 && b >= 0.0 {
        // concordant, non-negative
        if a > b {
            a - (s / 2.0) * (1.0 - a)
        } else if a < b {
            a + (s / 2.0) * (1.0 - a)
        } else {
            a
        }
    } else if a < 0.0 && b < 0.0 {
        // concordant, negative
        if a > b {
            a + (s / 2.0) * (1.0 + a)
        } else if a < b {
            a - (s / 2.0) * (1.0 + a)
        } else {
            a
        }
    } else if a >= 0.0 {
        // discordant, neighbor negative
        if s > 0.0 {
            a - (s / 2.0) * (1.0 - a)
        } else {
            a + (s / 2.0) * (1.0 - a)
        }
    } else {
        // discordant, neighbor non-negative
        if s > 0.0 {
            a + (s / 2.0) * (1.0 + a)
        } else {
            a - (s / 2.0) * (1.0 + a)
        }
    }
}
