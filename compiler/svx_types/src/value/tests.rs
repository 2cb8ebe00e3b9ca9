use super::*;
use pretty_assertions::assert_eq;

fn int(width: u32, value: u64) -> SvInt {
    SvInt::new(width, value, false).unwrap()
}

#[test]
fn new_truncates_to_width() {
    assert_eq!(int(4, 0x1f).to_u64(), Some(0xf));
    assert_eq!(SvInt::new(0, 1, false), Err(ValueError::ZeroWidth));
}

#[test]
fn slice_extracts_bit_range() {
    let v = int(16, 0xabcd);
    assert_eq!(v.slice(15, 8).unwrap().to_u64(), Some(0xab));
    assert_eq!(v.slice(3, 0).unwrap().to_u64(), Some(0xd));
    assert_eq!(v.slice(7, 4).unwrap().width(), 4);
}

#[test]
fn slice_out_of_range_is_an_error() {
    let v = int(8, 0);
    assert_eq!(
        v.slice(8, 0),
        Err(ValueError::SliceOutOfRange {
            msb: 8,
            lsb: 0,
            width: 8
        })
    );
    assert!(v.slice(2, 3).is_err());
}

#[test]
fn slice_across_word_boundary() {
    let wide = SvInt::concat(&[int(8, 0x5a), int(64, u64::MAX)]).unwrap();
    assert_eq!(wide.width(), 72);
    assert_eq!(wide.slice(71, 64).unwrap().to_u64(), Some(0x5a));
    assert_eq!(wide.slice(67, 60).unwrap().to_u64(), Some(0xaf));
    assert_eq!(wide.to_u64(), None);
}

#[test]
fn concat_puts_first_part_on_top() {
    let v = SvInt::concat(&[int(4, 0x3), int(4, 0xc)]).unwrap();
    assert_eq!(v.to_u64(), Some(0x3c));
}

#[test]
fn equality_extends_narrower_operand() {
    assert_eq!(int(8, 5), int(32, 5));
    assert_ne!(int(8, 5), int(8, 6));

    let neg8 = SvInt::new(8, 0xff, true).unwrap();
    let neg32 = SvInt::new(32, 0xffff_ffff, true).unwrap();
    assert_eq!(neg8, neg32);
    // Zero extension when either side is unsigned.
    assert_ne!(neg8, int(32, 0xffff_ffff));
}

#[test]
fn equality_across_widths_is_not_transitive() {
    let nibble = SvInt::new(4, 0b1111, true).unwrap();
    let zero_extended = int(8, 0b0000_1111);
    let sign_extended = SvInt::new(8, 0b1111_1111, true).unwrap();

    assert_eq!(nibble, zero_extended);
    assert_eq!(nibble, sign_extended);
    assert_ne!(zero_extended, sign_extended);
}

#[test]
fn resize_sign_extends_signed_values() {
    let neg = SvInt::new(4, 0b1110, true).unwrap();
    assert_eq!(neg.resize(8).unwrap().to_u64(), Some(0xfe));
    assert_eq!(neg.to_i64(), Some(-2));
    assert_eq!(int(4, 0b1110).resize(8).unwrap().to_u64(), Some(0x0e));
}

#[test]
fn clog2_and_count_ones() {
    assert_eq!(int(32, 0).clog2(), 0);
    assert_eq!(int(32, 1).clog2(), 0);
    assert_eq!(int(32, 8).clog2(), 3);
    assert_eq!(int(32, 9).clog2(), 4);
    assert_eq!(int(32, 0xf0f).count_ones(), 8);
}

#[test]
fn constant_truthiness() {
    assert!(ConstantValue::logic(true).is_true());
    assert!(ConstantValue::logic(false).is_false());
    assert!(!ConstantValue::Null.is_true());
    assert!(!ConstantValue::Null.is_false());
    assert!(ConstantValue::Null.bad());
    assert!(!ConstantValue::Str("x".into()).is_true());
}

#[test]
fn pack_concatenates_elements() {
    let value = ConstantValue::Unpacked(vec![
        ConstantValue::Integer(int(8, 0x12)),
        ConstantValue::Unpacked(vec![
            ConstantValue::Integer(int(4, 0x3)),
            ConstantValue::Integer(int(4, 0x4)),
        ]),
    ]);
    assert_eq!(value.pack().unwrap().to_u64(), Some(0x1234));
    assert_eq!(ConstantValue::Str("s".into()).pack(), None);
}

#[test]
fn display_forms() {
    assert_eq!(int(8, 3).to_string(), "8'd3");
    assert_eq!(SvInt::new(8, 0xfd, true).unwrap().to_string(), "-8'sd3");
    assert_eq!(ConstantValue::tagged(1, ConstantValue::logic(true)).to_string(), "tagged #1 1'd1");
}
