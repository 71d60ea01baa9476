// src/tests/common.rs

//! Common data for tests: event records and whole XML exports.

#![allow(non_upper_case_globals)]

use ::lazy_static::lazy_static;

use crate::data::association::Association;

pub const HOST1: &str = "WKSTN-0042.corp.example.com";
pub const HOST2: &str = "LAPTOP-7.corp.example.com";
pub const SERIAL1: &str = "4C530001230512118262";
pub const SERIAL2: &str = "ABC123SERIAL";
pub const DEVICEID1: &str = r"USB\VID_0781&PID_5567\4C530001230512118262";
pub const DEVICEID2: &str = r"USB\VID_1234&PID_5678\ABC123SERIAL";
pub const DEVICEID_PCI: &str = r"PCI\VEN_1234&DEV_5678&SUBSYS_00000000&REV_01\3&11583659&0&10";

pub const PROVIDER_AUDIT: &str = "Microsoft-Windows-Security-Auditing";
pub const PROVIDER_PNP: &str = "Microsoft-Windows-Kernel-PnP";

/// Escape `&` for XML text.
pub fn xml_escape(value: &str) -> String {
    value.replace('&', "&amp;")
}

/// Create one `<Event>` record as written by Windows Event Viewer.
///
/// Each of `device_ids` becomes one `<Data Name="DeviceId">` element.
pub fn event_xml(
    event_id: &str,
    provider: &str,
    computer: &str,
    device_ids: &[&str],
) -> String {
    let mut data = String::new();
    for device_id in device_ids.iter() {
        data.push_str(&format!(
            "    <Data Name=\"DeviceId\">{}</Data>\n",
            xml_escape(device_id)
        ));
    }
    format!(
        r#"<Event xmlns="http://schemas.microsoft.com/win/2004/08/events/event">
  <System>
    <Provider Name="{}" Guid="{{54849625-5478-4994-A5BA-3E3B0328C30D}}"/>
    <EventID>{}</EventID>
    <Version>1</Version>
    <Level>0</Level>
    <Task>13316</Task>
    <Keywords>0x8020000000000000</Keywords>
    <TimeCreated SystemTime="2023-05-02T14:11:09.123456700Z"/>
    <EventRecordID>581123</EventRecordID>
    <Channel>Security</Channel>
    <Computer>{}</Computer>
    <Security/>
  </System>
  <EventData>
    <Data Name="SubjectUserSid">S-1-5-18</Data>
{}    <Data Name="DeviceDescription">USB Mass Storage Device</Data>
    <Data Name="ClassName">USB</Data>
  </EventData>
</Event>"#,
        provider, event_id, computer, data,
    )
}

/// A USB plug event record of `device_id` plugged into `computer`.
pub fn event_usb(
    computer: &str,
    device_id: &str,
) -> String {
    event_xml("6416", PROVIDER_AUDIT, computer, &[device_id])
}

/// A logon event record; not a USB plug event.
pub fn event_logon(computer: &str) -> String {
    event_xml("4624", PROVIDER_AUDIT, computer, &[])
}

lazy_static! {
    /// `SERIAL1` plugged into `HOST1`
    pub static ref EVENT_USB1: String = event_usb(HOST1, DEVICEID1);
    /// `SERIAL2` plugged into `HOST2`
    pub static ref EVENT_USB2: String = event_usb(HOST2, DEVICEID2);
    pub static ref EVENT_LOGON1: String = event_logon(HOST1);

    pub static ref ASSOCIATION1: Association =
        Association::new(HOST1.to_string(), SERIAL1.to_string());
    pub static ref ASSOCIATION2: Association =
        Association::new(HOST2.to_string(), SERIAL2.to_string());

    /// An XML export of three records, one USB plug event, with NUL padding
    /// between records and after the last record.
    pub static ref EXPORT_3_1: String = format!(
        "{}\r\n{}\0\0\0\r\n{}\n\0\0\0\0",
        *EVENT_LOGON1, *EVENT_USB1, *EVENT_LOGON1,
    );
    /// An XML export of four records, three USB plug events.
    pub static ref EXPORT_4_3: String = format!(
        "{}\n{}\n{}\n{}\n",
        *EVENT_USB1, *EVENT_LOGON1, *EVENT_USB2, *EVENT_USB1,
    );
}
