// SPDX-License-Identifier: MIT
//
// Terminal input parser.
//
// Turns raw stdin bytes into structured events. Only the protocols the
// shell actually enables in `terminal.rs` are decoded:
//
// - Legacy CSI sequences (arrows, Home/End, paging, editing keys)
// - SGR mouse protocol (press / release / drag / move / scroll)
// - Focus reporting (terminal gained / lost focus)
// - Alt+key (ESC followed by a printable character)
// - UTF-8 multi-byte characters
//
// Anything else — unknown CSI finals, stray bytes — is skipped wholesale
// rather than misread as keystrokes.
//
// # Design
//
// Escape sequences can span multiple read() calls, so the parser keeps a
// small byte buffer. Feed bytes with [`Parser::advance`]; a lone ESC is
// ambiguous (standalone Escape vs. sequence start), so after a short
// timeout with no new bytes call [`Parser::flush`] to resolve it as a
// real Escape keypress.
//
// Numbers are parsed directly from `&[u8]`; no intermediate String.

use bitflags::bitflags;

// ─── Event types ─────────────────────────────────────────────────────────────

/// A parsed terminal input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),
    /// A mouse event (button action or movement with position).
    Mouse(MouseEvent),
    /// Terminal window gained focus (`CSI I`).
    FocusGained,
    /// Terminal window lost focus (`CSI O`).
    FocusLost,
}

/// A key identity with its active modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Which key was pressed.
    pub code: KeyCode,
    /// Active modifier keys.
    pub modifiers: Modifiers,
}

/// Identity of a key. Printable characters use [`Char`](KeyCode::Char).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// A Unicode character.
    Char(char),
    // ── Named keys ──────────────────────────────────────────────
    Enter,
    Tab,
    Backspace,
    Escape,
    Delete,
    // ── Navigation ──────────────────────────────────────────────
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

bitflags! {
    /// Keyboard modifier flags.
    ///
    /// Matches the xterm CSI modifier encoding (`param = 1 + bitmask`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const CTRL  = 0b0000_0100;
        const SUPER = 0b0000_1000;
    }
}

/// A mouse action with position and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// What happened.
    pub kind: MouseEventKind,
    /// 0-indexed column.
    pub x: u16,
    /// 0-indexed row.
    pub y: u16,
    /// Active modifier keys during the event.
    pub modifiers: Modifiers,
}

/// Mouse event classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    /// Button pressed.
    Press(MouseButton),
    /// Button released.
    Release(MouseButton),
    /// Mouse moved while a button is held.
    Drag(MouseButton),
    /// Mouse moved without any button held. This is the event the orb
    /// follows; it only arrives under any-motion tracking (DEC 1003).
    Move,
    /// Scroll wheel up.
    ScrollUp,
    /// Scroll wheel down.
    ScrollDown,
    /// Scroll wheel left.
    ScrollLeft,
    /// Scroll wheel right.
    ScrollRight,
}

/// Mouse button identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

// ─── Parser ─────────────────────────────────────────────────────────────────

/// Terminal input parser.
///
/// Feed raw bytes via [`advance`](Parser::advance) and collect structured
/// [`Event`]s. Incomplete sequences stay buffered until more bytes arrive.
///
/// # Escape vs. escape-sequence ambiguity
///
/// A bare `ESC` byte could be a standalone Escape keypress or the start of
/// a longer sequence. The parser holds it back; the caller waits a short
/// timeout and then calls [`flush`](Parser::flush) to emit the pending ESC
/// as a real Escape key event.
pub struct Parser {
    buf: Vec<u8>,
}

impl Parser {
    /// A parser with an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(64),
        }
    }

    /// Feed raw stdin bytes and return every event that parses completely.
    ///
    /// Bytes forming an incomplete sequence stay in the internal buffer and
    /// combine with future calls.
    pub fn advance(&mut self, data: &[u8]) -> Vec<Event> {
        self.buf.extend_from_slice(data);
        let mut events = Vec::new();
        let mut pos = 0;

        while pos < self.buf.len() {
            match scan_event(&self.buf[pos..]) {
                Scan::Emit(event, consumed) => {
                    events.push(event);
                    pos += consumed;
                }
                Scan::Partial => break,
                Scan::Skip(n) => pos += n,
            }
        }

        if pos > 0 {
            self.buf.drain(..pos);
        }

        events
    }

    /// Whether unconsumed bytes are waiting for more data.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Resolve pending bytes as literal key events.
    ///
    /// Called after a timeout: a lone ESC becomes an Escape keypress, and
    /// any other leftovers become their literal keys.
    pub fn flush(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        for &byte in &self.buf {
            let event = match byte {
                0x1B => press(KeyCode::Escape),
                0x00 => ctrl_press(KeyCode::Char('@')),
                b @ 0x01..=0x1A => ctrl_press(KeyCode::Char((b + b'a' - 1) as char)),
                0x7F => press(KeyCode::Backspace),
                b @ 0x20..=0x7E => press(KeyCode::Char(b as char)),
                _ => continue,
            };
            events.push(event);
        }
        self.buf.clear();
        events
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Stateless scanning ──────────────────────────────────────────────────────
//
// Scan functions are pure: they look at the front of a byte slice and say
// what they found plus how many bytes it took.

/// Outcome of scanning for one event.
enum Scan {
    /// An event parsed, consuming `usize` bytes.
    Emit(Event, usize),
    /// The sequence needs more bytes.
    Partial,
    /// Unrecognized byte(s); drop `usize` of them.
    Skip(usize),
}

fn scan_event(buf: &[u8]) -> Scan {
    let Some(&lead) = buf.first() else {
        return Scan::Skip(0);
    };

    match lead {
        0x1B => scan_escape(buf),
        // Control characters.
        0x00 => Scan::Emit(ctrl_press(KeyCode::Char('@')), 1),
        b @ (0x01..=0x07 | 0x0B..=0x0C | 0x0E..=0x1A) => {
            Scan::Emit(ctrl_press(KeyCode::Char((b + b'a' - 1) as char)), 1)
        }
        0x08 | 0x7F => Scan::Emit(press(KeyCode::Backspace), 1),
        0x09 => Scan::Emit(press(KeyCode::Tab), 1),
        0x0A | 0x0D => Scan::Emit(press(KeyCode::Enter), 1),
        // ASCII printable.
        b @ 0x20..=0x7E => Scan::Emit(press(KeyCode::Char(b as char)), 1),
        // UTF-8 multi-byte.
        0xC0..=0xFF => scan_utf8(buf),
        // Bare continuation bytes: invalid lead, drop.
        _ => Scan::Skip(1),
    }
}

// ── Escape sequences ─────────────────────────────────────────────────────────

fn scan_escape(buf: &[u8]) -> Scan {
    debug_assert_eq!(buf[0], 0x1B);

    if buf.len() < 2 {
        return Scan::Partial;
    }

    match buf[1] {
        // CSI: ESC [
        b'[' => scan_csi(buf),
        // Alt+ESC.
        0x1B => Scan::Emit(modified(KeyCode::Escape, Modifiers::ALT), 2),
        // Alt+printable. This also covers ESC O: SS3 arrows only appear in
        // application cursor-keys mode, which is never enabled here.
        b @ 0x20..=0x7E => Scan::Emit(modified(KeyCode::Char(b as char), Modifiers::ALT), 2),
        // Alt+control character.
        b @ 0x01..=0x1A => Scan::Emit(
            modified(
                KeyCode::Char((b + b'a' - 1) as char),
                Modifiers::ALT | Modifiers::CTRL,
            ),
            2,
        ),
        // Unknown byte after ESC: emit standalone Escape.
        _ => Scan::Emit(press(KeyCode::Escape), 1),
    }
}

// ── CSI ─────────────────────────────────────────────────────────────────────

fn scan_csi(buf: &[u8]) -> Scan {
    debug_assert!(buf.len() >= 2 && buf[0] == 0x1B && buf[1] == b'[');

    if buf.len() < 3 {
        return Scan::Partial;
    }

    // SGR mouse: ESC [ <
    if buf[2] == b'<' {
        return scan_sgr_mouse(buf);
    }

    // Focus reporting: ESC [ I (gained) / ESC [ O (lost).
    if buf[2] == b'I' {
        return Scan::Emit(Event::FocusGained, 3);
    }
    if buf[2] == b'O' {
        return Scan::Emit(Event::FocusLost, 3);
    }

    // Scan for the final byte (0x40..=0x7E). Parameter bytes are
    // 0x30..=0x3F, intermediates 0x20..=0x2F.
    let mut end = 2;
    while end < buf.len() {
        let b = buf[end];
        if (0x40..=0x7E).contains(&b) {
            break;
        }
        if !(0x20..=0x3F).contains(&b) {
            return Scan::Skip(end + 1);
        }
        end += 1;
    }

    if end >= buf.len() {
        return Scan::Partial;
    }

    let final_byte = buf[end];
    let params = csi_params(&buf[2..end]);
    let consumed = end + 1;

    let modifiers = params.get(1).map_or(Modifiers::empty(), |&p| decode_modifiers(p));

    // Tilde-terminated editing keys: CSI n [; mods] ~
    if final_byte == b'~' {
        let event = match params.first().copied().unwrap_or(0) {
            1 | 7 => modified(KeyCode::Home, modifiers),
            3 => modified(KeyCode::Delete, modifiers),
            4 | 8 => modified(KeyCode::End, modifiers),
            5 => modified(KeyCode::PageUp, modifiers),
            6 => modified(KeyCode::PageDown, modifiers),
            _ => return Scan::Skip(consumed),
        };
        return Scan::Emit(event, consumed);
    }

    // Letter finals: CSI [1; mods] letter
    let event = match final_byte {
        b'A' => modified(KeyCode::Up, modifiers),
        b'B' => modified(KeyCode::Down, modifiers),
        b'C' => modified(KeyCode::Right, modifiers),
        b'D' => modified(KeyCode::Left, modifiers),
        b'H' => modified(KeyCode::Home, modifiers),
        b'F' => modified(KeyCode::End, modifiers),
        b'Z' => modified(KeyCode::Tab, Modifiers::SHIFT),
        _ => return Scan::Skip(consumed),
    };

    Scan::Emit(event, consumed)
}

// ── SGR mouse ───────────────────────────────────────────────────────────────

fn scan_sgr_mouse(buf: &[u8]) -> Scan {
    // Format: ESC [ < Pb ; Px ; Py M    (press / motion)
    //         ESC [ < Pb ; Px ; Py m    (release)
    debug_assert!(buf.len() >= 3 && buf[2] == b'<');

    let start = 3;
    let mut end = start;
    while end < buf.len() {
        if buf[end] == b'M' || buf[end] == b'm' {
            break;
        }
        if !buf[end].is_ascii_digit() && buf[end] != b';' {
            return Scan::Skip(end + 1);
        }
        end += 1;
    }

    if end >= buf.len() {
        return Scan::Partial;
    }

    let is_release = buf[end] == b'm';
    let consumed = end + 1;

    let mut fields = buf[start..end].split(|&b| b == b';');
    let cb = fields.next().map_or(0, ascii_u16);
    let raw_x = fields.next().map_or(0, ascii_u16);
    let raw_y = fields.next().map_or(0, ascii_u16);

    // SGR coordinates are 1-indexed.
    let x = raw_x.saturating_sub(1);
    let y = raw_y.saturating_sub(1);

    let mut modifiers = Modifiers::empty();
    if cb & 4 != 0 {
        modifiers |= Modifiers::SHIFT;
    }
    if cb & 8 != 0 {
        modifiers |= Modifiers::ALT;
    }
    if cb & 16 != 0 {
        modifiers |= Modifiers::CTRL;
    }

    let is_scroll = cb & 64 != 0;
    let is_motion = cb & 32 != 0;
    let base = cb & 3;

    let kind = if is_scroll {
        match base {
            0 => MouseEventKind::ScrollUp,
            1 => MouseEventKind::ScrollDown,
            2 => MouseEventKind::ScrollLeft,
            _ => MouseEventKind::ScrollRight,
        }
    } else if is_motion {
        // Bit 5 set: motion. Base < 3 means a button is held (drag);
        // base 3 is free movement.
        match base {
            0 => MouseEventKind::Drag(MouseButton::Left),
            1 => MouseEventKind::Drag(MouseButton::Middle),
            2 => MouseEventKind::Drag(MouseButton::Right),
            _ => MouseEventKind::Move,
        }
    } else if is_release {
        MouseEventKind::Release(decode_mouse_button(base))
    } else {
        MouseEventKind::Press(decode_mouse_button(base))
    };

    Scan::Emit(Event::Mouse(MouseEvent { kind, x, y, modifiers }), consumed)
}

// ── UTF-8 ───────────────────────────────────────────────────────────────────

fn scan_utf8(buf: &[u8]) -> Scan {
    let expected = utf8_char_len(buf[0]);

    if expected == 0 {
        return Scan::Skip(1);
    }
    if buf.len() < expected {
        return Scan::Partial;
    }

    // Continuation bytes must look like 0b10xxxxxx.
    for &b in &buf[1..expected] {
        if b & 0xC0 != 0x80 {
            return Scan::Skip(1);
        }
    }

    std::str::from_utf8(&buf[..expected]).map_or(Scan::Skip(1), |s| {
        s.chars().next().map_or(Scan::Skip(expected), |ch| {
            Scan::Emit(press(KeyCode::Char(ch)), expected)
        })
    })
}

// ─── Helpers ────────────────────────────────────────────────────────────────

const fn press(code: KeyCode) -> Event {
    Event::Key(KeyEvent {
        code,
        modifiers: Modifiers::empty(),
    })
}

const fn ctrl_press(code: KeyCode) -> Event {
    Event::Key(KeyEvent {
        code,
        modifiers: Modifiers::CTRL,
    })
}

const fn modified(code: KeyCode, modifiers: Modifiers) -> Event {
    Event::Key(KeyEvent { code, modifiers })
}

/// Parse semicolon-separated CSI parameters.
///
/// Colon sub-parameters (used by protocols we don't enable) are ignored;
/// parsing stops at the first non-digit within each field.
fn csi_params(raw: &[u8]) -> Vec<u16> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(|&b| b == b';').map(ascii_u16).collect()
}

/// Decimal value of a field's leading ASCII digits. Saturates on overflow.
fn ascii_u16(field: &[u8]) -> u16 {
    field
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0u16, |acc, &b| {
            acc.saturating_mul(10).saturating_add(u16::from(b - b'0'))
        })
}

/// Decode the xterm CSI modifier parameter (`1 + bitmask`; 0 or 1 means none).
/// The truncation keeps only the low bits, which is where the flags live.
#[allow(clippy::cast_possible_truncation)]
const fn decode_modifiers(param: u16) -> Modifiers {
    let val = if param > 0 { param - 1 } else { 0 };
    Modifiers::from_bits_truncate(val as u8)
}

const fn decode_mouse_button(base: u16) -> MouseButton {
    match base {
        0 => MouseButton::Left,
        1 => MouseButton::Middle,
        _ => MouseButton::Right,
    }
}

/// Expected byte length of a UTF-8 character from its lead byte.
/// Returns 0 for invalid leads (continuation bytes, 0xFE, 0xFF).
const fn utf8_char_len(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 0,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(data: &[u8]) -> Vec<Event> {
        Parser::new().advance(data)
    }

    fn parse_one(data: &[u8]) -> Event {
        let events = parse(data);
        assert_eq!(events.len(), 1, "expected 1 event, got {events:?}");
        events[0]
    }

    fn key(code: KeyCode) -> Event {
        press(code)
    }

    fn key_mod(code: KeyCode, modifiers: Modifiers) -> Event {
        modified(code, modifiers)
    }

    // ── ASCII printable ─────────────────────────────────────────────────

    #[test]
    fn single_char() {
        assert_eq!(parse_one(b"q"), key(KeyCode::Char('q')));
    }

    #[test]
    fn char_run() {
        let events = parse(b"abc");
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], key(KeyCode::Char('a')));
        assert_eq!(events[2], key(KeyCode::Char('c')));
    }

    #[test]
    fn digits() {
        let events = parse(b"123456");
        assert_eq!(events.len(), 6);
        assert_eq!(events[0], key(KeyCode::Char('1')));
        assert_eq!(events[5], key(KeyCode::Char('6')));
    }

    #[test]
    fn space() {
        assert_eq!(parse_one(b" "), key(KeyCode::Char(' ')));
    }

    // ── Control characters ──────────────────────────────────────────────

    #[test]
    fn ctrl_c() {
        assert_eq!(parse_one(b"\x03"), key_mod(KeyCode::Char('c'), Modifiers::CTRL));
    }

    #[test]
    fn ctrl_at() {
        assert_eq!(parse_one(b"\x00"), key_mod(KeyCode::Char('@'), Modifiers::CTRL));
    }

    #[test]
    fn enter_cr_and_lf() {
        assert_eq!(parse_one(b"\r"), key(KeyCode::Enter));
        assert_eq!(parse_one(b"\n"), key(KeyCode::Enter));
    }

    #[test]
    fn tab() {
        assert_eq!(parse_one(b"\t"), key(KeyCode::Tab));
    }

    #[test]
    fn backspace_both_encodings() {
        assert_eq!(parse_one(b"\x08"), key(KeyCode::Backspace));
        assert_eq!(parse_one(b"\x7F"), key(KeyCode::Backspace));
    }

    // ── CSI keys ────────────────────────────────────────────────────────

    #[test]
    fn arrows() {
        assert_eq!(parse_one(b"\x1b[A"), key(KeyCode::Up));
        assert_eq!(parse_one(b"\x1b[B"), key(KeyCode::Down));
        assert_eq!(parse_one(b"\x1b[C"), key(KeyCode::Right));
        assert_eq!(parse_one(b"\x1b[D"), key(KeyCode::Left));
    }

    #[test]
    fn home_end_letter_finals() {
        assert_eq!(parse_one(b"\x1b[H"), key(KeyCode::Home));
        assert_eq!(parse_one(b"\x1b[F"), key(KeyCode::End));
    }

    #[test]
    fn home_end_tilde_finals() {
        assert_eq!(parse_one(b"\x1b[1~"), key(KeyCode::Home));
        assert_eq!(parse_one(b"\x1b[4~"), key(KeyCode::End));
        assert_eq!(parse_one(b"\x1b[7~"), key(KeyCode::Home));
        assert_eq!(parse_one(b"\x1b[8~"), key(KeyCode::End));
    }

    #[test]
    fn paging_keys() {
        assert_eq!(parse_one(b"\x1b[5~"), key(KeyCode::PageUp));
        assert_eq!(parse_one(b"\x1b[6~"), key(KeyCode::PageDown));
    }

    #[test]
    fn delete_key() {
        assert_eq!(parse_one(b"\x1b[3~"), key(KeyCode::Delete));
    }

    #[test]
    fn shift_tab() {
        assert_eq!(parse_one(b"\x1b[Z"), key_mod(KeyCode::Tab, Modifiers::SHIFT));
    }

    #[test]
    fn modified_arrow() {
        // CSI 1;5A is Ctrl+Up.
        assert_eq!(parse_one(b"\x1b[1;5A"), key_mod(KeyCode::Up, Modifiers::CTRL));
    }

    #[test]
    fn modified_delete() {
        // CSI 3;2~ is Shift+Delete.
        assert_eq!(
            parse_one(b"\x1b[3;2~"),
            key_mod(KeyCode::Delete, Modifiers::SHIFT)
        );
    }

    #[test]
    fn unsupported_csi_is_skipped() {
        // A Kitty-style key report; the shell never enables that protocol.
        assert!(parse(b"\x1b[97;5u").is_empty());
    }

    #[test]
    fn unsupported_tilde_code_is_skipped() {
        // Insert.
        assert!(parse(b"\x1b[2~").is_empty());
    }

    // ── Alt combinations ────────────────────────────────────────────────

    #[test]
    fn alt_char() {
        assert_eq!(parse_one(b"\x1bt"), key_mod(KeyCode::Char('t'), Modifiers::ALT));
    }

    #[test]
    fn alt_escape() {
        assert_eq!(parse_one(b"\x1b\x1b"), key_mod(KeyCode::Escape, Modifiers::ALT));
    }

    // ── ESC ambiguity ───────────────────────────────────────────────────

    #[test]
    fn lone_esc_is_held_back() {
        let mut parser = Parser::new();
        assert!(parser.advance(b"\x1b").is_empty());
        assert!(parser.has_pending());
    }

    #[test]
    fn flush_resolves_lone_esc() {
        let mut parser = Parser::new();
        parser.advance(b"\x1b");
        let events = parser.flush();
        assert_eq!(events, vec![key(KeyCode::Escape)]);
        assert!(!parser.has_pending());
    }

    #[test]
    fn sequence_split_across_reads() {
        let mut parser = Parser::new();
        assert!(parser.advance(b"\x1b[").is_empty());
        let events = parser.advance(b"A");
        assert_eq!(events, vec![key(KeyCode::Up)]);
    }

    // ── SGR mouse ───────────────────────────────────────────────────────

    #[test]
    fn mouse_left_press() {
        let event = parse_one(b"\x1b[<0;10;5M");
        assert_eq!(
            event,
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Press(MouseButton::Left),
                x: 9,
                y: 4,
                modifiers: Modifiers::empty(),
            })
        );
    }

    #[test]
    fn mouse_release() {
        let event = parse_one(b"\x1b[<0;10;5m");
        assert!(matches!(
            event,
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Release(MouseButton::Left),
                ..
            })
        ));
    }

    #[test]
    fn mouse_free_motion() {
        // Base 3 + motion bit 32 = 35: movement with no button held.
        let event = parse_one(b"\x1b[<35;42;13M");
        assert_eq!(
            event,
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Move,
                x: 41,
                y: 12,
                modifiers: Modifiers::empty(),
            })
        );
    }

    #[test]
    fn mouse_drag() {
        // Base 0 + motion bit 32: left-button drag.
        let event = parse_one(b"\x1b[<32;5;5M");
        assert!(matches!(
            event,
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Drag(MouseButton::Left),
                ..
            })
        ));
    }

    #[test]
    fn mouse_scroll() {
        assert!(matches!(
            parse_one(b"\x1b[<64;1;1M"),
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::ScrollUp,
                ..
            })
        ));
        assert!(matches!(
            parse_one(b"\x1b[<65;1;1M"),
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::ScrollDown,
                ..
            })
        ));
    }

    #[test]
    fn mouse_with_ctrl() {
        // Press with ctrl flag (bit 16).
        let event = parse_one(b"\x1b[<16;3;3M");
        assert!(matches!(
            event,
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Press(MouseButton::Left),
                modifiers: Modifiers::CTRL,
                ..
            })
        ));
    }

    #[test]
    fn mouse_origin_clamps_to_zero() {
        // Coordinates are 1-indexed on the wire; 0 must not underflow.
        let event = parse_one(b"\x1b[<35;0;0M");
        assert!(matches!(
            event,
            Event::Mouse(MouseEvent { x: 0, y: 0, .. })
        ));
    }

    #[test]
    fn mouse_split_across_reads() {
        let mut parser = Parser::new();
        assert!(parser.advance(b"\x1b[<35;10").is_empty());
        let events = parser.advance(b"0;42M");
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            Event::Mouse(MouseEvent { x: 99, y: 41, .. })
        ));
    }

    // ── Focus reporting ─────────────────────────────────────────────────

    #[test]
    fn focus_gained_and_lost() {
        assert_eq!(parse_one(b"\x1b[I"), Event::FocusGained);
        assert_eq!(parse_one(b"\x1b[O"), Event::FocusLost);
    }

    // ── UTF-8 ───────────────────────────────────────────────────────────

    #[test]
    fn utf8_two_byte() {
        assert_eq!(parse_one("é".as_bytes()), key(KeyCode::Char('é')));
    }

    #[test]
    fn utf8_three_byte() {
        assert_eq!(parse_one("中".as_bytes()), key(KeyCode::Char('中')));
    }

    #[test]
    fn utf8_four_byte() {
        assert_eq!(parse_one("🔥".as_bytes()), key(KeyCode::Char('🔥')));
    }

    #[test]
    fn utf8_split_across_reads() {
        let bytes = "中".as_bytes();
        let mut parser = Parser::new();
        assert!(parser.advance(&bytes[..1]).is_empty());
        assert!(parser.advance(&bytes[1..2]).is_empty());
        let events = parser.advance(&bytes[2..]);
        assert_eq!(events, vec![key(KeyCode::Char('中'))]);
    }

    #[test]
    fn invalid_utf8_continuation_is_dropped() {
        // Lead byte promises 2 bytes but the follow-up is ASCII.
        let events = parse(b"\xC3A");
        assert_eq!(events, vec![key(KeyCode::Char('A'))]);
    }

    #[test]
    fn bare_continuation_byte_is_dropped() {
        assert!(parse(b"\x80").is_empty());
    }

    // ── Mixed streams ───────────────────────────────────────────────────

    #[test]
    fn keys_and_mouse_interleaved() {
        let events = parse(b"t\x1b[<35;5;5Mq");
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], key(KeyCode::Char('t')));
        assert!(matches!(events[1], Event::Mouse(_)));
        assert_eq!(events[2], key(KeyCode::Char('q')));
    }

    #[test]
    fn flush_spells_out_leftover_bytes() {
        let mut parser = Parser::new();
        parser.advance(b"\x1b[");
        let events = parser.flush();
        assert_eq!(
            events,
            vec![key(KeyCode::Escape), key(KeyCode::Char('['))]
        );
    }
}
