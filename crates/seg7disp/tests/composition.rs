//! Display driving a real FD6551 channel over a recording I2C bus.

#![allow(clippy::unwrap_used)]

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
use fd6551::Fd6551;
use platform::mocks::{MockI2cError, RecordingI2c};
use platform::{DisplayDescription, Error};
use seg7disp::{map_to_seg7, mirror, SevenSegmentDisplay};

type Channel = Fd6551<NoopRawMutex, RecordingI2c>;

const BOARD: &str = r#"{
    "controller": "fd6551",
    "digits": { "reg": [52, 53, 54, 55], "digits-flipped": true },
    "glyphs": { "reg": 51, "glyph-names": ["alarm", "usb", "play", "pause", "colon", "lan", "wifi"] },
    "enable": { "reg": 36 }
}"#;

fn board() -> DisplayDescription {
    serde_json::from_str(BOARD).unwrap()
}

#[test]
fn description_loads_from_json() {
    let desc = board();
    assert_eq!(desc.controller.as_deref(), Some("fd6551"));
    let digits = desc.digits.unwrap();
    assert_eq!(digits.reg.as_slice(), &[0x34, 0x35, 0x36, 0x37]);
    assert!(digits.flipped);
    assert_eq!(desc.glyphs.unwrap().names.len(), 7);
}

#[test]
fn optional_nodes_may_be_left_out() {
    let desc: DisplayDescription =
        serde_json::from_str(r#"{ "controller": "fd6551", "enable": { "reg": 36 } }"#).unwrap();
    assert!(desc.digits.is_none());
    assert!(desc.glyphs.is_none());
}

#[tokio::test]
async fn writes_reach_the_bus_one_byte_per_register() {
    let fd = Channel::new(RecordingI2c::new(), 0x24);
    let disp = SevenSegmentDisplay::<NoopRawMutex, _>::probe(&board(), |label| {
        (label == "fd6551").then_some(&fd)
    })
    .unwrap();

    disp.set_enable(true).await.unwrap();
    disp.set_digits("42").await.unwrap();
    disp.set_glyph("usb", true).await.unwrap();
    drop(disp);

    let m = |c| vec![mirror(map_to_seg7(c))];
    assert_eq!(
        fd.release().writes(),
        &[
            (0x24, vec![1]),
            (0x34, m(b'4')),
            (0x35, m(b'2')),
            (0x36, vec![0]),
            (0x37, vec![0]),
            (0x33, vec![0b10]),
        ]
    );
}

#[tokio::test]
async fn nak_from_controller_is_not_a_failure() {
    let mut i2c = RecordingI2c::new();
    i2c.fail_nth(1, ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data));
    let fd = Channel::new(i2c, 0x24);
    let disp =
        SevenSegmentDisplay::<NoopRawMutex, _>::probe(&board(), |_| Some(&fd)).unwrap();

    disp.set_digits("8888").await.unwrap();
    assert_eq!(disp.digit_patterns().await.unwrap().as_slice(), &[0x7F; 4]);
}

#[tokio::test]
async fn bus_failure_surfaces_through_the_display() {
    let mut i2c = RecordingI2c::new();
    i2c.fail_nth(1, ErrorKind::ArbitrationLoss);
    let fd = Channel::new(i2c, 0x24);
    let disp =
        SevenSegmentDisplay::<NoopRawMutex, _>::probe(&board(), |_| Some(&fd)).unwrap();

    assert_eq!(
        disp.set_digits("8888").await,
        Err(Error::Bus(MockI2cError(ErrorKind::ArbitrationLoss)))
    );
    assert_eq!(disp.digit_patterns().await.unwrap().as_slice(), &[0x7F, 0, 0, 0]);
}
