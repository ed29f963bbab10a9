//! Sensor reads and the fail-once contract of the connection handle.

use oi_teleop_engine::{
    CommandFrame, ConnectionHandle, DriveConfig, IntFormat, KeyEventKind, TeleopError,
    TeleopSession, read_i8, read_i16, read_u8, read_u16,
};
use oi_teleop_test_helpers::prelude::*;

fn handle_with_reply(bytes: &[u8]) -> (ConnectionHandle<MockTransport>, MockProbe) {
    let (transport, probe) = MockTransport::new();
    probe.push_reply(bytes);
    (ConnectionHandle::open(transport), probe)
}

mod typed_reads {
    use super::*;

    #[test]
    fn test_read_each_width() -> TestResult {
        let (mut conn, probe) = handle_with_reply(&[200, 0xFF, 0x01, 0x2C, 0xFE, 0xD4]);

        assert_eq!(read_u8(&mut conn)?, 200);
        assert_eq!(read_i8(&mut conn)?, -1);
        assert_eq!(read_u16(&mut conn)?, 300);
        assert_eq!(read_i16(&mut conn)?, -300);
        assert_eq!(probe.pending_reply_bytes(), 0);
        assert!(conn.is_open());
        Ok(())
    }

    #[test]
    fn test_bytes_arriving_one_at_a_time() -> TestResult {
        let (mut conn, probe) = handle_with_reply(&[0x12, 0x34]);
        probe.set_read_chunk(1);

        assert_eq!(read_u16(&mut conn)?, 0x1234);
        Ok(())
    }

    #[test]
    fn test_extra_bytes_stay_queued() -> TestResult {
        let (mut conn, probe) = handle_with_reply(&[1, 2, 3]);

        assert_eq!(read_u8(&mut conn)?, 1);
        assert_eq!(probe.pending_reply_bytes(), 2);
        Ok(())
    }
}

mod faults {
    use super::*;

    #[test]
    fn test_short_read_is_format_error_and_poisons() {
        let (mut conn, _probe) = handle_with_reply(&[0x01]);

        let err = must_err(read_u16(&mut conn));
        assert_eq!(
            err,
            TeleopError::Format {
                expected: 2,
                actual: 1
            }
        );
        assert!(!conn.is_open());
        assert!(conn.fault().is_some());

        let err = must_err(read_u8(&mut conn));
        assert!(matches!(err, TeleopError::ConnectionLost(_)));
    }

    #[test]
    fn test_timeout_with_nothing_received() {
        let (mut conn, _probe) = handle_with_reply(&[]);

        let err = must_err(read_i16(&mut conn));
        assert_eq!(
            err,
            TeleopError::Format {
                expected: 2,
                actual: 0
            }
        );
    }

    #[test]
    fn test_read_error_is_connection_lost() {
        let (mut conn, probe) = handle_with_reply(&[1]);
        probe.fail_reads(true);

        let err = must_err(read_u8(&mut conn));
        assert!(matches!(err, TeleopError::ConnectionLost(_)));
        assert!(!conn.is_open());
    }

    #[test]
    fn test_poisoned_handle_refuses_writes() {
        let (mut conn, probe) = handle_with_reply(&[]);
        must_err(read_u8(&mut conn));

        let err = must_err(conn.send(&oi_teleop_engine::OiCommand::Safe.frame()));
        assert!(matches!(err, TeleopError::ConnectionLost(_)));
        assert_eq!(probe.write_count(), 0);
    }
}

mod session_reads {
    use super::*;

    #[test]
    fn test_query_then_read() -> TestResult {
        let mut session = TeleopSession::new(DriveConfig::default(), RecordingSink::new());
        let (transport, probe) = MockTransport::new();
        session.connect(transport);

        session.send_frame(&CommandFrame::try_from_slice(&[142, 7])?)?;
        probe.push_reply(&[0x05]);
        let reading = session.read_sensor(IntFormat::U8)?;

        assert_eq!(reading.as_u8(), Some(5));
        assert_eq!(probe.writes(), vec![vec![142, 7]]);
        assert_eq!(session.sink().lines(), vec!["142 7"]);
        Ok(())
    }

    #[test]
    fn test_short_read_discards_session_connection() -> TestResult {
        let mut session = TeleopSession::new(DriveConfig::default(), RecordingSink::new());
        let (transport, probe) = MockTransport::new();
        session.connect(transport);
        probe.push_reply(&[0x80]);

        let err = must_err(session.read_sensor(IntFormat::I16));
        assert!(matches!(err, TeleopError::Format { expected: 2, actual: 1 }));
        assert!(!session.is_connected());
        assert_eq!(session.connection_id(), None);

        let err = must_err(session.handle_key(KeyEventKind::Press, "w"));
        assert!(matches!(err, TeleopError::ConnectionLost(_)));
        assert_eq!(probe.write_count(), 0);
        Ok(())
    }

    #[test]
    fn test_read_without_connection() {
        let mut session: TeleopSession<MockTransport, RecordingSink> =
            TeleopSession::new(DriveConfig::default(), RecordingSink::new());
        let err = must_err(session.read_sensor(IntFormat::U8));
        assert_eq!(err, TeleopError::not_connected());
    }
}
