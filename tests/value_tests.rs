extern crate sda5708;

mod common;

use sda5708::SDA5708Error;

#[test]
fn decimal_value_test() {
    let (mut display, _) = common::display();

    assert!(display.print_number(99_999_999).is_ok());
    assert!(display.print_number(100_000_000).is_err());
    assert!(display.print_number(-9_999_999).is_ok());
    assert!(display.print_number(-10_000_000).is_err());
    assert!(display.print_number(u64::MAX).is_err());
}

#[test]
fn hexadecimal_value_test() {
    let (mut display, _) = common::display();

    assert!(display.print_hex_number(0xFFFF_FFFFu32).is_ok());
    assert!(display.print_hex_number(0x1_0000_0000u64).is_err());
    assert!(display.print_hex_number(-0xFFF_FFFF).is_ok());
    assert!(display.print_hex_number(-0x1000_0000).is_err());
}

#[test]
fn values_are_right_aligned() {
    let (mut display, _) = common::display();

    display.print_number(42).unwrap();
    assert_eq!(display.buffer().cells(), b"      42");

    display.print_number(-1234).unwrap();
    assert_eq!(display.buffer().cells(), b"   -1234");

    display.print_hex_number(0xBEEFu16).unwrap();
    assert_eq!(display.buffer().cells(), b"    BEEF");

    display.print_hex_number(-0x1F).unwrap();
    assert_eq!(display.buffer().cells(), b"     -1F");
}

#[test]
fn rejected_value_keeps_buffer() {
    let (mut display, log) = common::display();

    display.print("KEEP ME");
    assert_eq!(
        display.print_number(123_456_789),
        Err(SDA5708Error::InvalidValue)
    );
    assert_eq!(display.buffer().cells(), b"KEEP ME ");
    assert!(common::decode(&log).is_empty());
}

#[test]
fn float_values_are_truncated() {
    let (mut display, _) = common::display();

    display.print_number(12.9f32).unwrap();
    assert_eq!(display.buffer().cells(), b"      12");
    assert!(display.print_number(f64::NAN).is_err());
}
