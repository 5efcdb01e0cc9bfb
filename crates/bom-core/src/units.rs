// bom-core/src/units.rs

use uom::si::f64::Length as UomLength;

/// Canonical length type for length-measured items (SI, f64).
pub type Length = UomLength;

#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

#[inline]
pub fn to_mm(len: Length) -> f64 {
    use uom::si::length::millimeter;
    len.get::<millimeter>()
}

#[inline]
pub fn to_m(len: Length) -> f64 {
    use uom::si::length::meter;
    len.get::<meter>()
}
