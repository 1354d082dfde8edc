//! Property tests for input report decoding.

use proptest::prelude::*;
use protocol::{Button, InputReport, REPORT_BUF_LEN, REPORT_MIN_LEN};

fn report_with_buttons(raw: u16) -> [u8; REPORT_MIN_LEN] {
    let mut buf = [0; REPORT_MIN_LEN];
    buf[0] = 0x20;
    buf[4..6].copy_from_slice(&raw.to_le_bytes());
    buf
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Buffers shorter than the report layout never decode.
    #[test]
    fn prop_short_buffers_yield_no_report(
        data in proptest::collection::vec(any::<u8>(), 0..REPORT_MIN_LEN),
    ) {
        prop_assert_eq!(InputReport::decode(&data), None);
    }

    /// Any buffer long enough for the layout decodes.
    #[test]
    fn prop_long_enough_buffers_always_decode(
        data in proptest::collection::vec(any::<u8>(), REPORT_MIN_LEN..=REPORT_BUF_LEN),
    ) {
        let report = InputReport::decode(&data);
        prop_assert!(report.is_some(), "{} bytes must decode", data.len());

        let report = report.unwrap();
        prop_assert_eq!(report.report_type(), data[0]);
        prop_assert_eq!(report.lt(), data[6]);
        prop_assert_eq!(report.rt(), data[7]);
        prop_assert_eq!(report.ry(), i16::from_le_bytes([data[14], data[15]]));
    }

    /// The pressed set is exactly the mapped names of the set bits.
    #[test]
    fn prop_pressed_matches_set_mapped_bits(raw: u16) {
        let report = InputReport::decode(&report_with_buttons(raw)).unwrap();

        let expected: Vec<Button> = (0..16u8)
            .filter(|bit| raw & (1 << bit) != 0)
            .filter_map(Button::from_bit)
            .collect();
        let pressed: Vec<Button> = report.pressed().collect();

        prop_assert_eq!(report.buttons().raw(), raw);
        prop_assert_eq!(pressed, expected);
    }

    /// Bit 11 never shows up as a pressed button.
    #[test]
    fn prop_unmapped_bit_is_ignored(raw: u16) {
        let with = InputReport::decode(&report_with_buttons(raw | 0x0800)).unwrap();
        let without = InputReport::decode(&report_with_buttons(raw & !0x0800)).unwrap();

        prop_assert!(with.pressed().eq(without.pressed()));
    }

    /// Rendering is deterministic for the same buffer.
    #[test]
    fn prop_display_is_deterministic(
        data in proptest::collection::vec(any::<u8>(), REPORT_MIN_LEN..=REPORT_BUF_LEN),
    ) {
        let first = InputReport::decode(&data).map(|r| r.to_string());
        let second = InputReport::decode(&data).map(|r| r.to_string());
        prop_assert_eq!(first, second);
    }
}

#[test]
fn test_ten_byte_buffer_never_decodes() {
    for fill in [0x00, 0x20, 0xff] {
        assert_eq!(InputReport::decode(&[fill; 10]), None);
    }
}
