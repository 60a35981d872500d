use fltext::{
    ftos, stof, BinaryFloat, FormatOptions, Layout, Notation, ParseOptions, Status, F80,
};

/// xorshift64*, enough to spread inputs over the whole range.
struct Rng(u64);

impl Rng {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 >> 12;
        self.0 ^= self.0 << 25;
        self.0 ^= self.0 >> 27;
        self.0.wrapping_mul(0x2545_f491_4f6c_dd1d)
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }

    fn finite_f64(&mut self) -> f64 {
        loop {
            let value = f64::from_bits(self.next());
            if value.is_finite() {
                return value;
            }
        }
    }

    fn finite_f32(&mut self) -> f32 {
        loop {
            let value = f32::from_bits(self.next() as u32);
            if value.is_finite() {
                return value;
            }
        }
    }

    /// Canonical finite extended value: the integer bit is set exactly for
    /// normal numbers.
    fn finite_f80(&mut self) -> F80 {
        let negative = self.below(2) as u128;
        let exponent = self.below(0x7fff) as u128;
        let mut significand = self.next() >> 1;
        if exponent != 0 {
            significand |= 1 << 63;
        }
        F80::from_bits(negative << 79 | exponent << 64 | u128::from(significand))
    }

    /// Random decimal text such as `31.4159e-3`.
    fn decimal_text(&mut self) -> String {
        let mut text = String::new();
        if self.below(2) == 0 {
            text.push('-');
        }
        let digits = 1 + self.below(25) as usize;
        let point = 1 + self.below(digits as u64) as usize;
        for i in 0..digits {
            if i == point {
                text.push('.');
            }
            text.push((b'0' + self.below(10) as u8) as char);
        }
        let exponent = self.below(650) as i64 - 340;
        text.push_str(&format!("e{}", exponent));
        text
    }
}

fn exact(layout: Layout, notation: Notation) -> FormatOptions {
    FormatOptions::new(layout).notation(notation).exact(true)
}

fn round_trip<F: BinaryFloat>(value: F, notation: Notation) -> F {
    let text = ftos(value, &exact(Layout::Scientific, notation));
    let parsed = stof::<F>(&text, &ParseOptions::new(notation)).unwrap();
    assert_eq!(parsed.consumed, text.len());
    assert_eq!(parsed.status, Status::Ok, "{}", text);
    parsed.value
}

#[test]
fn exact_text_round_trips() {
    let mut rng = Rng(0x9e37_79b9_7f4a_7c15);
    for _ in 0..300 {
        let value = rng.finite_f64();
        for &notation in &[Notation::Decimal, Notation::Hex, Notation::HexBinary] {
            assert_eq!(round_trip(value, notation).to_bits(), value.to_bits());
        }
        let value = rng.finite_f32();
        assert_eq!(round_trip(value, Notation::Decimal).to_bits(), value.to_bits());
    }
}

#[test]
fn exact_extended_round_trips() {
    let mut rng = Rng(0x0123_4567_89ab_cdef);
    for _ in 0..60 {
        let value = rng.finite_f80();
        let back = round_trip(value, Notation::Decimal);
        assert_eq!(back.to_bits(), value.to_bits());
        let back = round_trip(value, Notation::HexBinary);
        assert_eq!(back.to_bits(), value.to_bits());
    }
}

#[test]
fn fixed_exact_round_trips() {
    let options = exact(Layout::Fixed, Notation::Decimal);
    let mut rng = Rng(42);
    for _ in 0..100 {
        let value = rng.finite_f64();
        let text = ftos(value, &options);
        let parsed = stof::<f64>(&text, &ParseOptions::default()).unwrap();
        assert_eq!(parsed.value.to_bits(), value.to_bits(), "{}", text);
    }
}

#[test]
fn widening_keeps_digits() {
    let mut rng = Rng(7);
    for _ in 0..100 {
        let value = rng.finite_f64();
        let options = exact(Layout::General, Notation::Decimal);
        assert_eq!(ftos(F80::from_f64(value), &options), ftos(value, &options));
    }
}

#[test]
fn rounded_text_is_stable() {
    let mut rng = Rng(0xdead_beef);
    for _ in 0..500 {
        // normal values, far from the overflow threshold
        let exponent = 100 + rng.below(1800);
        let bits = rng.below(2) << 63 | exponent << 52 | rng.below(1 << 52);
        let value = f64::from_bits(bits);
        let options = FormatOptions::new(Layout::Scientific).precision(rng.below(14) as usize);

        let first = ftos(value, &options);
        let parsed = stof::<f64>(&first, &ParseOptions::default()).unwrap();
        assert_eq!(ftos(parsed.value, &options), first);
    }
}

#[test]
fn parsing_agrees_with_std() {
    let mut rng = Rng(0x5eed);
    for _ in 0..2000 {
        let text = rng.decimal_text();
        let expected = text.parse::<f64>().unwrap();
        let parsed = stof::<f64>(&text, &ParseOptions::default()).unwrap();
        assert_eq!(parsed.value.to_bits(), expected.to_bits(), "{}", text);

        let expected = text.parse::<f32>().unwrap();
        let parsed = stof::<f32>(&text, &ParseOptions::default()).unwrap();
        assert_eq!(parsed.value.to_bits(), expected.to_bits(), "{}", text);
    }
}

#[test]
fn fixed_text_agrees_with_std() {
    let options = FormatOptions::new(Layout::Fixed);
    let mut rng = Rng(0xc0ffee);
    let mut checked = 0;
    while checked < 1000 {
        let exponent = 1023 - 20 + rng.below(60);
        let bits = rng.below(2) << 63 | exponent << 52 | rng.below(1 << 52);
        let value = f64::from_bits(bits);
        // an exact tie at the sixth digit needs at most seven fraction digits
        if (value * 128.0).fract() != 0.0 {
            assert_eq!(ftos(value, &options), format!("{:.6}", value));
        }
        let single = value as f32;
        if (single * 128.0).fract() != 0.0 {
            assert_eq!(ftos(single, &options), format!("{:.6}", single));
        }
        checked += 1;
    }
}
