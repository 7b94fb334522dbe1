//! Property-based tests for the FD6551 diagnostic channel.

#![allow(clippy::unwrap_used)]

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use fd6551::{DiagnosticCommand, Fd6551, ParseError};
use platform::mocks::RecordingI2c;
use platform::Error;

proptest::proptest! {
    /// Every byte pair survives formatting in any of the accepted bases.
    #[test]
    fn any_byte_pair_parses_in_every_base(addr in 0u8..=255u8, val in 0u8..=255u8, base in 0usize..3) {
        let input = match base {
            0 => format!("{addr} {val}\n"),
            1 => format!("{addr:#x} {val:#X}"),
            _ => format!("0{addr:o} 0{val:o}"),
        };
        let cmd = DiagnosticCommand::parse(&input).unwrap();
        assert_eq!(cmd, DiagnosticCommand { addr, val });
    }

    /// Anything above a byte is rejected, never truncated.
    #[test]
    fn values_above_255_are_never_truncated(val in 256u32..=u32::MAX) {
        assert_eq!(
            DiagnosticCommand::parse(&format!("0x34 {val}")),
            Err(ParseError::OutOfRange)
        );
    }

    /// The parser never panics on arbitrary input.
    #[test]
    fn parser_never_panics(input in ".{0,32}") {
        let _ = DiagnosticCommand::parse(&input);
    }
}

#[tokio::test]
async fn diagnostic_write_reaches_the_addressed_register() {
    let fd = Fd6551::<NoopRawMutex, _>::new(RecordingI2c::new(), 0x24);

    fd.run_diagnostic("0x24 1").await.unwrap();
    fd.run_diagnostic("0x34 0x3f").await.unwrap();
    assert_eq!(fd.run_diagnostic("0x200 1").await, Err(Error::InvalidArgument));
    assert_eq!(fd.run_diagnostic("0x90 1").await, Err(Error::InvalidArgument));

    assert_eq!(
        fd.release().writes(),
        &[(0x24, vec![0x01]), (0x34, vec![0x3F])]
    );
}
