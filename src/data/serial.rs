// src/data/serial.rs

//! Find the USB serial number within a `DeviceId` value.
//!
//! A `DeviceId` value of a USB plug event is a USB device instance path,
//! e.g.
//!
//! ```lang-text
//! USB\VID_0781&PID_5567\4C530001230512118262
//! ```
//!
//! The vendor code follows `VID_`, the product code follows `PID_`, and
//! the instance suffix after the next backslash is the serial number.
//!
//! This is a structural match only. The vendor and product codes are not
//! checked against any registry.

use ::const_format::concatcp;
use ::lazy_static::lazy_static;
use ::regex::Regex;
#[allow(unused_imports)]
use ::si_trace_print::{
    defn,
    defo,
    defx,
    defñ,
};

/// Capture group name for the serial number in [`USB_SERIAL_PATTERN`].
pub const CGN_SERIAL: &str = "serial";

/// The one pattern for finding a serial number in a `DeviceId` value.
///
/// * anchored at the beginning of the value
/// * literal `USB\VID_` followed by uppercase hexadecimal digits
/// * literal `&PID_` followed by decimal digits
/// * literal `\`
/// * capture group [`CGN_SERIAL`]: one non-whitespace character then one or
///   more of any character up to the end of the line
///
/// The capture is the remainder of the value, so a serial is always at least
/// two characters.
pub const USB_SERIAL_PATTERN: &str = concatcp!(
    r"^USB\\VID_[0-9A-F]+&PID_[0-9]+\\",
    "(?P<", CGN_SERIAL, r">\S.+)",
);

lazy_static! {
    /// Compiled [`USB_SERIAL_PATTERN`].
    static ref USB_SERIAL_REGEX: Regex = {
        defñ!("lazy_static! USB_SERIAL_REGEX::new()");

        match Regex::new(USB_SERIAL_PATTERN) {
            Ok(val) => val,
            Err(err) => panic!("Regex::new({:?}) failed {}", USB_SERIAL_PATTERN, err),
        }
    };
}

/// Return the serial number within `device_id`, if `device_id` is a USB
/// device instance path.
///
/// Returns `None` if `device_id` does not match [`USB_SERIAL_PATTERN`].
/// That is not an error; the caller should try the next `DeviceId`.
pub fn usb_serial(device_id: &str) -> Option<&str> {
    defn!("({:?})", device_id);
    let captures = match USB_SERIAL_REGEX.captures(device_id) {
        Some(captures) => captures,
        None => {
            defx!("no match, return None");
            return None;
        }
    };
    let serial: Option<&str> = captures
        .name(CGN_SERIAL)
        .map(|match_| match_.as_str());
    defx!("return {:?}", serial);

    serial
}
