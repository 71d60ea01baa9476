// src/tests/serial_tests.rs

//! tests for `serial.rs`

#![allow(non_snake_case)]

use ::test_case::test_case;

use crate::data::serial::usb_serial;
use crate::tests::common::{
    DEVICEID1,
    DEVICEID2,
    DEVICEID_PCI,
    SERIAL1,
    SERIAL2,
};

#[test_case(DEVICEID1, Some(SERIAL1); "sandisk")]
#[test_case(DEVICEID2, Some(SERIAL2); "plain")]
#[test_case(r"USB\VID_0951&PID_1666\E0D55EA573DCF450E97C0A6B", Some("E0D55EA573DCF450E97C0A6B"); "kingston")]
#[test_case(r"USB\VID_1234&PID_5678\6&2A6C3E4B&0&2", Some("6&2A6C3E4B&0&2"); "generated instance")]
#[test_case(r"USB\VID_1234&PID_5678\AB CD", Some("AB CD"); "inner space")]
#[test_case(r"USB\VID_1234&PID_5678\AB", Some("AB"); "two characters")]
#[test_case(r"USB\VID_1234&PID_5678\A", None; "one character")]
#[test_case(r"USB\VID_1234&PID_5678\ AB", None; "leading space")]
#[test_case(r"USB\VID_1234&PID_5678\", None; "no serial")]
#[test_case(r"USB\VID_abcd&PID_5678\AB12", None; "lowercase vendor")]
#[test_case(r"USB\VID_1234&PID_56AB\AB12", None; "hexadecimal product")]
#[test_case(r" USB\VID_1234&PID_5678\AB12", None; "not at beginning")]
#[test_case(r"USBSTOR\Disk&Ven_SanDisk&Prod_Cruzer&Rev_1.00\4C530001", None; "usbstor")]
#[test_case(r"PCI\VEN_1234", None; "pci short")]
#[test_case(DEVICEID_PCI, None; "pci")]
#[test_case("", None; "empty")]
fn test_usb_serial(
    device_id: &str,
    expect: Option<&str>,
) {
    assert_eq!(usb_serial(device_id), expect, "usb_serial({:?})", device_id);
}
