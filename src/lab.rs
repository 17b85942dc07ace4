//! RGB to CIE L*a*b* conversion for homogeneity comparison.

/// Convert an RGB triple with components in `[0, max]` to L*a*b*.
///
/// The primaries are treated as linear sRGB under D65; only relative
/// distances between nearby pixels matter here.
#[inline]
pub fn rgb_to_lab(rgb: [i32; 3], max: i32) -> [f32; 3] {
    let scale = 1.0 / max as f32;
    let r = rgb[0] as f32 * scale;
    let g = rgb[1] as f32 * scale;
    let b = rgb[2] as f32 * scale;

    let x = 0.412_456_4 * r + 0.357_576_1 * g + 0.180_437_5 * b;
    let y = 0.212_672_9 * r + 0.715_152_2 * g + 0.072_175_0 * b;
    let z = 0.019_333_9 * r + 0.119_192_0 * g + 0.950_304_1 * b;

    // D65 white point.
    let fx = lab_f(x / 0.950_47);
    let fy = lab_f(y);
    let fz = lab_f(z / 1.088_83);

    [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

#[inline]
fn lab_f(t: f32) -> f32 {
    const DELTA: f32 = 6.0 / 29.0;

    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

#[cfg(test)]
mod tests {
    use super::rgb_to_lab;

    #[test]
    fn test_white() {
        let [l, a, b] = rgb_to_lab([255, 255, 255], 255);
        assert!((l - 100.0).abs() < 0.5, "L={}", l);
        assert!(a.abs() < 1.0, "a={}", a);
        assert!(b.abs() < 1.0, "b={}", b);
    }

    #[test]
    fn test_black() {
        let [l, a, b] = rgb_to_lab([0, 0, 0], 4095);
        assert!(l.abs() < 0.5, "L={}", l);
        assert!(a.abs() < 0.5, "a={}", a);
        assert!(b.abs() < 0.5, "b={}", b);
    }

    #[test]
    fn test_depth_independent() {
        let lab8 = rgb_to_lab([255, 0, 0], 255);
        let lab16 = rgb_to_lab([65535, 0, 0], 65535);
        for (p, q) in lab8.iter().zip(lab16.iter()) {
            assert!((p - q).abs() < 1e-3);
        }
    }
}
