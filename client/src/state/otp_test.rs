use super::*;

fn type_all(entry: &mut OtpEntry, code: &str) -> Vec<String> {
    code.chars()
        .enumerate()
        .filter_map(|(i, ch)| entry.enter(i, ch).completed)
        .collect()
}

// =============================================================================
// construction
// =============================================================================

#[test]
fn new_entry_has_empty_slots_and_focus_zero() {
    let entry = OtpEntry::new(6);
    assert_eq!(entry.length(), 6);
    assert_eq!(entry.focus(), 0);
    assert_eq!(entry.digits(), vec![""; 6]);
    assert!(!entry.is_complete());
    assert_eq!(entry.code(), None);
}

#[test]
fn zero_length_is_clamped_to_one_slot() {
    assert_eq!(OtpEntry::new(0).length(), 1);
}

#[test]
fn default_uses_six_slots() {
    assert_eq!(OtpEntry::default().length(), DEFAULT_OTP_LENGTH);
}

// =============================================================================
// enter
// =============================================================================

#[test]
fn entering_six_digits_emits_exactly_once() {
    let mut entry = OtpEntry::new(6);
    let emitted = type_all(&mut entry, "123456");
    assert_eq!(emitted, vec!["123456".to_owned()]);
    assert_eq!(entry.code().as_deref(), Some("123456"));
}

#[test]
fn enter_advances_focus_until_last_slot() {
    let mut entry = OtpEntry::new(3);
    entry.enter(0, '1');
    assert_eq!(entry.focus(), 1);
    entry.enter(1, '2');
    assert_eq!(entry.focus(), 2);
    entry.enter(2, '3');
    assert_eq!(entry.focus(), 2);
}

#[test]
fn enter_rejects_non_digit() {
    let mut entry = OtpEntry::new(6);
    let outcome = entry.enter(0, 'a');
    assert!(!outcome.accepted);
    assert_eq!(entry.slot(0), None);
    assert_eq!(entry.focus(), 0);
}

#[test]
fn enter_rejects_out_of_range_index() {
    let mut entry = OtpEntry::new(2);
    assert!(!entry.enter(2, '1').accepted);
    assert_eq!(entry, OtpEntry::new(2));
}

#[test]
fn overwriting_a_full_entry_emits_latest_code() {
    let mut entry = OtpEntry::new(4);
    type_all(&mut entry, "1234");
    let outcome = entry.enter(1, '9');
    assert_eq!(outcome.completed.as_deref(), Some("1934"));
}

// =============================================================================
// input (raw DOM value)
// =============================================================================

#[test]
fn input_takes_last_typed_character() {
    let mut entry = OtpEntry::new(4);
    entry.enter(0, '3');
    entry.input(0, "37");
    assert_eq!(entry.slot(0), Some('7'));
    assert_eq!(entry.focus(), 1);
}

#[test]
fn input_empty_value_clears_slot_without_moving_focus() {
    let mut entry = OtpEntry::new(4);
    entry.enter(2, '5');
    let outcome = entry.input(2, "");
    assert!(outcome.accepted);
    assert_eq!(entry.slot(2), None);
    assert_eq!(entry.focus(), 2);
}

#[test]
fn input_rejects_trailing_letter() {
    let mut entry = OtpEntry::new(4);
    assert!(!entry.input(0, "x").accepted);
    assert_eq!(entry.slot(0), None);
}

// =============================================================================
// backspace
// =============================================================================

#[test]
fn backspace_on_empty_slot_retreats_focus() {
    let mut entry = OtpEntry::new(6);
    entry.enter(0, '1');
    entry.enter(1, '2');
    entry.backspace(2);
    assert_eq!(entry.focus(), 1);
    assert_eq!(entry.slot(1), Some('2'));
}

#[test]
fn backspace_on_filled_slot_clears_only_that_slot() {
    let mut entry = OtpEntry::new(6);
    type_all(&mut entry, "123");
    entry.backspace(1);
    assert_eq!(entry.slot(0), Some('1'));
    assert_eq!(entry.slot(1), None);
    assert_eq!(entry.slot(2), Some('3'));
    assert_eq!(entry.focus(), 1);
}

#[test]
fn backspace_on_first_empty_slot_stays_put() {
    let mut entry = OtpEntry::new(6);
    entry.backspace(0);
    assert_eq!(entry.focus(), 0);
}

#[test]
fn backspace_never_emits() {
    let mut entry = OtpEntry::new(2);
    type_all(&mut entry, "12");
    assert_eq!(entry.backspace(1).completed, None);
}

// =============================================================================
// paste
// =============================================================================

#[test]
fn paste_with_letters_is_rejected_entirely() {
    let mut entry = OtpEntry::new(6);
    entry.enter(0, '9');
    let before = entry.clone();
    let outcome = entry.paste("12ab56");
    assert!(!outcome.accepted);
    assert_eq!(outcome.completed, None);
    assert_eq!(entry, before);
}

#[test]
fn paste_full_code_fills_and_emits_once() {
    let mut entry = OtpEntry::new(6);
    let outcome = entry.paste("123456");
    assert_eq!(outcome.completed.as_deref(), Some("123456"));
    assert_eq!(entry.focus(), 5);
}

#[test]
fn paste_short_code_fills_prefix_without_completion() {
    let mut entry = OtpEntry::new(6);
    let outcome = entry.paste("123");
    assert!(outcome.accepted);
    assert_eq!(outcome.completed, None);
    assert_eq!(entry.digits(), vec!["1", "2", "3", "", "", ""]);
    assert_eq!(entry.focus(), 3);
}

#[test]
fn paste_short_code_keeps_trailing_slots() {
    let mut entry = OtpEntry::new(4);
    entry.enter(3, '7');
    let outcome = entry.paste("123");
    assert_eq!(outcome.completed.as_deref(), Some("1237"));
}

#[test]
fn paste_longer_than_length_is_truncated() {
    let mut entry = OtpEntry::new(4);
    let outcome = entry.paste("98765");
    assert_eq!(outcome.completed.as_deref(), Some("9876"));
    assert_eq!(entry.focus(), 3);
}

#[test]
fn paste_empty_text_is_rejected() {
    let mut entry = OtpEntry::new(4);
    assert!(!entry.paste("").accepted);
}

#[test]
fn re_paste_after_completion_emits_again() {
    let mut entry = OtpEntry::new(6);
    assert!(entry.paste("123456").completed.is_some());
    assert_eq!(entry.paste("654321").completed.as_deref(), Some("654321"));
}

// =============================================================================
// reset / helpers
// =============================================================================

#[test]
fn reset_clears_slots_and_focus() {
    let mut entry = OtpEntry::new(6);
    entry.paste("123456");
    entry.reset();
    assert_eq!(entry, OtpEntry::new(6));
}

#[test]
fn is_complete_code_checks_length_and_digits() {
    assert!(is_complete_code("123456", 6));
    assert!(!is_complete_code("12345", 6));
    assert!(!is_complete_code("12345a", 6));
}
