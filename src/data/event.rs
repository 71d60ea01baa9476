// src/data/event.rs

//! Implement [`EventRecord`] and [`parse_event`], parsing one XML event
//! record into an [`Association`].
//!
//! Here is an example USB plug event record (Event ID 6416, "A new external
//! device was recognized by the system") as written by Windows Event Viewer:
//!
//! ```lang-xml
//! <Event xmlns="http://schemas.microsoft.com/win/2004/08/events/event">
//!   <System>
//!     <Provider Name="Microsoft-Windows-Security-Auditing" Guid="{54849625-5478-4994-A5BA-3E3B0328C30D}"/>
//!     <EventID>6416</EventID>
//!     <Version>1</Version>
//!     <Level>0</Level>
//!     <Task>13316</Task>
//!     <Opcode>0</Opcode>
//!     <Keywords>0x8020000000000000</Keywords>
//!     <TimeCreated SystemTime="2023-05-02T14:11:09.123456700Z"/>
//!     <EventRecordID>581123</EventRecordID>
//!     <Correlation/>
//!     <Execution ProcessID="4" ThreadID="9412"/>
//!     <Channel>Security</Channel>
//!     <Computer>WKSTN-0042.corp.example.com</Computer>
//!     <Security/>
//!   </System>
//!   <EventData>
//!     <Data Name="SubjectUserSid">S-1-5-18</Data>
//!     <Data Name="SubjectUserName">WKSTN-0042$</Data>
//!     <Data Name="SubjectDomainName">CORP</Data>
//!     <Data Name="SubjectLogonId">0x3e7</Data>
//!     <Data Name="DeviceId">USB\VID_0781&amp;PID_5567\4C530001230512118262</Data>
//!     <Data Name="DeviceDescription">USB Mass Storage Device</Data>
//!     <Data Name="ClassId">{36FC9E60-C465-11CF-8056-444553540000}</Data>
//!     <Data Name="ClassName">USB</Data>
//!     <Data Name="VendorIds">USB\VID_0781&amp;PID_5567&amp;REV_0100</Data>
//!   </EventData>
//! </Event>
//! ```
//!
//! [`Association`]: crate::data::association::Association

use std::fmt;
use std::num::ParseIntError;
use std::str::Utf8Error;

use ::roxmltree::{
    Document,
    Node,
};
#[allow(unused_imports)]
use ::si_trace_print::{
    defn,
    defo,
    defx,
    defñ,
};
use ::thiserror::Error;

use crate::common::ResultS3;
use crate::data::association::{
    Association,
    Host,
};
use crate::data::serial::usb_serial;

/// The `EventID` value type. Windows event identifiers are 16 bits.
pub type EventId = u16;

/// `EventID` of "A new external device was recognized by the system".
pub const EVENTID_USB_PLUG: EventId = 6416;
/// The only `Provider` `Name` accepted for [`EVENTID_USB_PLUG`] events.
pub const PROVIDER_SECURITY_AUDITING: &str = "Microsoft-Windows-Security-Auditing";

const TAG_EVENTID: &str = "EventID";
const TAG_SYSTEM: &str = "System";
const TAG_PROVIDER: &str = "Provider";
const TAG_COMPUTER: &str = "Computer";
const TAG_EVENTDATA: &str = "EventData";
const TAG_DATA: &str = "Data";
const ATTR_NAME: &str = "Name";
/// `Name` attribute value of the `Data` element holding a device instance
/// path.
pub const DATA_NAME_DEVICEID: &str = "DeviceId";

/// Errors of a malformed event record.
///
/// A record that is well-formed but is not a USB plug event is not an
/// error; see [`ResultParseEvent`].
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum EventError {
    #[error("record is not UTF-8: {0}")]
    Utf8(#[from] Utf8Error),
    #[error("record is not XML: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("no {0} element")]
    MissingElement(&'static str),
    #[error("no {1} attribute in {0} element")]
    MissingAttribute(&'static str, &'static str),
    #[error("bad EventID {0:?}: {1}")]
    EventIdParse(String, ParseIntError),
    #[error("bad EventID {0:?}: not decimal digits")]
    EventIdNotDecimal(String),
}

/// Result of [`parse_event`].
///
/// * `Found(Association)` the record is a USB plug event
/// * `Done` the record is not a USB plug event; a different `EventID`,
///   a different `Provider`, or no `DeviceId` with a USB serial number
/// * `Err(EventError)` the record is malformed
pub type ResultParseEvent = ResultS3<Association, EventError>;

/// The fields of a USB plug event record.
///
/// Only created for records with `EventID` [`EVENTID_USB_PLUG`] and
/// `Provider` [`PROVIDER_SECURITY_AUDITING`]. Borrows from the
/// parsed [`Document`].
///
/// [`Document`]: https://docs.rs/roxmltree/0.20.0/roxmltree/struct.Document.html
pub struct EventRecord<'a> {
    event_id: EventId,
    provider: &'a str,
    computer: &'a str,
    /// `DeviceId` values in document order.
    device_ids: Vec<&'a str>,
}

impl fmt::Debug for EventRecord<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("EventRecord")
            .field("EventID", &self.event_id)
            .field("Provider", &self.provider)
            .field("Computer", &self.computer)
            .field("DeviceIds", &self.device_ids)
            .finish()
    }
}

/// First descendant element of `node` with local name `name`.
///
/// Namespaces are ignored; Windows event exports put every element in the
/// `http://schemas.microsoft.com/win/2004/08/events/event` namespace.
fn find_descendant<'a, 'input>(
    node: Node<'a, 'input>,
    name: &str,
) -> Option<Node<'a, 'input>> {
    node.descendants()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

impl<'a> EventRecord<'a> {
    /// Collect the fields of a USB plug event from `doc`.
    ///
    /// Returns `Ok(None)` when `doc` is not a USB plug event.
    /// The checks happen in order; a record with a different `EventID` is
    /// rejected before its `Provider` or `Computer` are looked for.
    pub fn from_document(
        doc: &'a Document<'a>,
    ) -> Result<Option<EventRecord<'a>>, EventError> {
        defn!();
        let root: Node = doc.root();

        let node_eventid = find_descendant(root, TAG_EVENTID)
            .ok_or(EventError::MissingElement(TAG_EVENTID))?;
        let eventid_text: &str = node_eventid.text().unwrap_or_default().trim();
        // `u16::from_str` allows a leading `+`
        if !eventid_text.bytes().all(|b| b.is_ascii_digit()) {
            defx!("EventID {:?} not decimal digits", eventid_text);
            return Err(EventError::EventIdNotDecimal(eventid_text.to_string()));
        }
        let event_id: EventId = eventid_text
            .parse::<EventId>()
            .map_err(|err| EventError::EventIdParse(eventid_text.to_string(), err))?;
        defo!("event_id {}", event_id);
        if event_id != EVENTID_USB_PLUG {
            defx!("event_id {} != {}, return None", event_id, EVENTID_USB_PLUG);
            return Ok(None);
        }

        let node_system: Option<Node> = find_descendant(root, TAG_SYSTEM);
        let node_provider = node_system
            .and_then(|n| find_descendant(n, TAG_PROVIDER))
            .ok_or(EventError::MissingElement(TAG_PROVIDER))?;
        let provider: &str = node_provider
            .attribute(ATTR_NAME)
            .ok_or(EventError::MissingAttribute(TAG_PROVIDER, ATTR_NAME))?;
        if provider != PROVIDER_SECURITY_AUDITING {
            defx!("provider {:?}, return None", provider);
            return Ok(None);
        }

        let node_computer = node_system
            .and_then(|n| find_descendant(n, TAG_COMPUTER))
            .ok_or(EventError::MissingElement(TAG_COMPUTER))?;
        let computer: &str = node_computer.text().unwrap_or_default();
        defo!("computer {:?}", computer);

        let device_ids: Vec<&str> = match find_descendant(root, TAG_EVENTDATA) {
            Some(node_eventdata) => node_eventdata
                .descendants()
                .filter(|n| n.is_element() && n.tag_name().name() == TAG_DATA)
                .filter(|n| n.attribute(ATTR_NAME) == Some(DATA_NAME_DEVICEID))
                .map(|n| n.text().unwrap_or_default())
                .collect(),
            None => Vec::with_capacity(0),
        };
        defx!("device_ids {:?}", device_ids);

        Ok(Some(EventRecord {
            event_id,
            provider,
            computer,
            device_ids,
        }))
    }

    pub const fn event_id(&self) -> EventId {
        self.event_id
    }

    pub const fn provider(&self) -> &str {
        self.provider
    }

    pub const fn computer(&self) -> &str {
        self.computer
    }

    pub fn device_ids(&self) -> &[&'a str] {
        self.device_ids.as_slice()
    }

    /// The [`Association`] of the first `DeviceId` holding a USB serial
    /// number. Later `DeviceId`s are not examined after a match.
    ///
    /// [`Association`]: crate::data::association::Association
    pub fn association(&self) -> Option<Association> {
        self.device_ids
            .iter()
            .find_map(|device_id| usb_serial(device_id))
            .map(|serial| Association::new(Host::from(self.computer), serial.to_string()))
    }
}

/// Parse one trimmed event record `data`.
///
/// See [`ResultParseEvent`] for the three outcomes.
pub fn parse_event(data: &[u8]) -> ResultParseEvent {
    defn!("({} bytes)", data.len());
    let result: ResultParseEvent = parse_event_impl(data).into();
    defx!("return {}", result);

    result
}

fn parse_event_impl(data: &[u8]) -> Result<Option<Association>, EventError> {
    let text: &str = std::str::from_utf8(data)?;
    let doc: Document = Document::parse(text)?;
    let association: Option<Association> = match EventRecord::from_document(&doc)? {
        Some(eventrecord) => {
            defo!("{:?}", eventrecord);
            eventrecord.association()
        }
        None => None,
    };

    Ok(association)
}
