// SPDX-License-Identifier: MIT
//
// wisp — a personal site that lives in the terminal.
//
// This is the main binary that wires together all the crates:
//
//   wisp-term   → terminal control, rendering, input parsing, event loop
//   wisp-theme  → appearance variants, persistence, host resolution
//   wisp-motion → pointer tracking and the cursor-chasing orb
//
// The Site struct implements wisp-term's App trait, connecting the event
// loop to the page state. Input flows through:
//
//   stdin → parser → on_event → scroll / selector / theme mutation
//   tick  → orb step → paint → framebuffer → diff renderer → terminal
//
// Layout:
//
//   ┌──────────────────────────────┐
//   │ nav bar (brand + sections)   │  ← 1 row
//   ├──────────────────────────────┤
//   │ body (scrolling sections,    │  ← h - 2 rows
//   │       orb floats over it)    │
//   ├──────────────────────────────┤
//   │ footer (key hints + variant) │  ← 1 row
//   └──────────────────────────────┘

use std::cell::RefCell;
use std::process;
use std::rc::Rc;

use wisp_motion::{FrameClock, OrbAnimator, PointerTracker, TickId, Vec2};
use wisp_term::buffer::{ClipRect, FrameBuffer, string_width};
use wisp_term::cell::{Attr, UnderlineStyle};
use wisp_term::color::Color;
use wisp_term::event_loop::{Action, App, EventLoop};
use wisp_term::input::{Event, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind};
use wisp_term::terminal::Size;
use wisp_theme::{AccentSet, AppearanceVariant, ResolvedVariant, Scene, ThemeStore, accents, scene};

// ─── Sections ────────────────────────────────────────────────────────────────

/// The five page sections, in nav order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Home,
    Projects,
    Skills,
    Experience,
    Contact,
}

impl Section {
    const ALL: [Self; 5] = [
        Self::Home,
        Self::Projects,
        Self::Skills,
        Self::Experience,
        Self::Contact,
    ];

    const fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Projects => "Projects",
            Self::Skills => "Skills",
            Self::Experience => "Experience",
            Self::Contact => "Contact",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Home => 0,
            Self::Projects => 1,
            Self::Skills => 2,
            Self::Experience => 3,
            Self::Contact => 4,
        }
    }

    /// The section after this one, wrapping at the end. Tab cycles.
    const fn next(self) -> Self {
        match self {
            Self::Home => Self::Projects,
            Self::Projects => Self::Skills,
            Self::Skills => Self::Experience,
            Self::Experience => Self::Contact,
            Self::Contact => Self::Home,
        }
    }
}

// ─── Page content ────────────────────────────────────────────────────────────

struct Project {
    title: &'static str,
    blurb: &'static str,
    tags: &'static [&'static str],
    archived: bool,
}

const PROJECTS: [Project; 4] = [
    Project {
        title: "driftwood",
        blurb: "a static-site compiler that renders to ANSI as readily as HTML",
        tags: &["rust", "parser", "ansi"],
        archived: false,
    },
    Project {
        title: "loomline",
        blurb: "differential terminal dashboards; 60 fps over a serial line",
        tags: &["rust", "tty", "diffing"],
        archived: false,
    },
    Project {
        title: "quietwire",
        blurb: "offline-first feed reader that syncs over whatever link exists",
        tags: &["rust", "sqlite", "sync"],
        archived: false,
    },
    Project {
        title: "glowbox",
        blurb: "CSS paint-worklet toys from a former life in the browser",
        tags: &["js", "houdini"],
        archived: true,
    },
];

struct SkillGroup {
    name: &'static str,
    /// Proficiency 0..=10, drawn as a gradient bar.
    skills: &'static [(&'static str, u8)],
}

const SKILL_GROUPS: [SkillGroup; 3] = [
    SkillGroup {
        name: "languages",
        skills: &[("rust", 9), ("c", 7), ("typescript", 6)],
    },
    SkillGroup {
        name: "terminal craft",
        skills: &[("escape protocols", 9), ("color science", 8), ("text shaping", 6)],
    },
    SkillGroup {
        name: "infrastructure",
        skills: &[("linux", 8), ("postgres", 7), ("nix", 5)],
    },
];

struct Role {
    period: &'static str,
    title: &'static str,
    company: &'static str,
    highlights: &'static [&'static str],
}

/// Reverse-chronological.
const ROLES: [Role; 3] = [
    Role {
        period: "2022 – now",
        title: "Senior Systems Engineer",
        company: "Driftline",
        highlights: &[
            "own the terminal rendering stack end to end",
            "cut p99 frame latency 8x with damage tracking",
        ],
    },
    Role {
        period: "2019 – 2022",
        title: "Platform Engineer",
        company: "Hatchmark",
        highlights: &[
            "built the ingest pipeline that survived three pivots",
            "paged twice a quarter, not twice a night",
        ],
    },
    Role {
        period: "2016 – 2019",
        title: "Software Engineer",
        company: "Brineworks",
        highlights: &["shipped the embedded UI for a tide-prediction buoy"],
    },
];

const CHANNELS: [(&str, &str); 3] = [
    ("email", "mara@wisp.sh"),
    ("code forge", "forge.wisp.sh/mara"),
    ("fediverse", "@mara@fedi.wisp.sh"),
];

const BRAND: &str = "◆ mara voss";
const HERO_TITLE: &str = "M A R A   V O S S";
const HERO_SUBTITLE: &str = "systems engineer";
const HERO_TAGLINE: &str = "terminal-first software, pixel-exact where it counts.";
const CTA_LABEL: &str = " get in touch ";
const FOOTER_HINTS: &str = "t theme · 1-5 go · tab next · ↑↓ scroll · q quit";

// ─── Loop clock ──────────────────────────────────────────────────────────────

/// Adapts the event loop's fixed frame deadline to the animator's
/// schedule/cancel protocol.
///
/// `schedule` arms the next deadline; `take_fired` disarms it when the
/// loop's tick phase runs. At most one tick is ever armed: the orb is
/// the only animation, and it reschedules itself from its own step. A
/// cancel between frames leaves nothing armed, so the next deadline
/// finds no tick to deliver.
struct LoopClock {
    next: u64,
    armed: Option<TickId>,
}

impl LoopClock {
    const fn new() -> Self {
        Self {
            next: 0,
            armed: None,
        }
    }

    /// Consume the armed tick at a frame deadline, if any.
    fn take_fired(&mut self) -> Option<TickId> {
        self.armed.take()
    }
}

impl FrameClock for LoopClock {
    fn schedule(&mut self) -> TickId {
        let id = TickId(self.next);
        self.next += 1;
        self.armed = Some(id);
        id
    }

    fn cancel(&mut self, id: TickId) -> bool {
        if self.armed == Some(id) {
            self.armed = None;
            true
        } else {
            false
        }
    }
}

// ─── Site ────────────────────────────────────────────────────────────────────

/// The page state.
///
/// Owns the theme store, the pointer tracker, and the orb animator.
/// Geometry derived during paint (section tops, nav spans, the CTA
/// span) is recorded on the struct and consumed by later events.
struct Site {
    store: ThemeStore,
    tracker: PointerTracker,
    orb: OrbAnimator,
    clock: LoopClock,

    /// First visible virtual body row.
    scroll: i32,

    /// Highlighted entry while the theme selector is open.
    selector: Option<usize>,

    /// Last reported pointer cell, for nav hover highlighting.
    pointer_cell: (u16, u16),

    /// Transient footer message, written by the theme subscription when
    /// the resolved variant actually changes. Cleared on the next key.
    flash: Rc<RefCell<Option<String>>>,

    /// Virtual row of each section header, from the last paint.
    section_tops: [i32; 5],

    /// Total virtual body rows, from the last paint.
    body_rows: i32,

    /// Body rows that fit on screen, from the last paint. Clamps
    /// scrolling and sizes page jumps.
    last_body_height: u16,

    /// Column span of each nav label, from the last paint.
    nav_spans: [(u16, u16); 5],

    /// Column span and row of the call-to-action button, from the last
    /// paint.
    cta_span: Option<(u16, u16, u16)>,
}

impl Site {
    /// A site backed by the store at the conventional config path.
    fn new(size: Size) -> Self {
        Self::with_store(ThemeStore::at_default_path(), size)
    }

    /// A site backed by an explicit store. Tests inject a temp-file
    /// store and a fixed host signal through here.
    fn with_store(mut store: ThemeStore, size: Size) -> Self {
        let flash = Rc::new(RefCell::new(None));

        // The store already skips notifying on a no-op set; this
        // subscription additionally compares the resolved variant, so a
        // stored change that lands on the same resolution (dark to
        // host-preference over a dark terminal) stays silent.
        let slot = Rc::clone(&flash);
        let mut last = store.resolve();
        store.subscribe(move |resolved| {
            if resolved != last {
                last = resolved;
                *slot.borrow_mut() = Some(format!("appearance: {}", resolved.label()));
            }
        });

        let mut tracker = PointerTracker::new();
        let mut clock = LoopClock::new();
        let mut orb = OrbAnimator::new();

        // Until the terminal reports real motion, both the pointer and
        // the orb sit at the center of the screen.
        let center = Vec2::new(f32::from(size.cols) / 2.0, f32::from(size.rows) / 2.0);
        tracker.push(center);
        orb.start(&mut clock, center);

        Self {
            store,
            tracker,
            orb,
            clock,
            scroll: 0,
            selector: None,
            pointer_cell: (0, 0),
            flash,
            section_tops: [0; 5],
            body_rows: 0,
            last_body_height: size.rows.saturating_sub(2),
            nav_spans: [(0, 0); 5],
            cta_span: None,
        }
    }

    // ── Scrolling ──────────────────────────────────────────────────────

    fn max_scroll(&self) -> i32 {
        (self.body_rows - i32::from(self.last_body_height)).max(0)
    }

    fn scroll_by(&mut self, delta: i32) {
        self.scroll = (self.scroll + delta).clamp(0, self.max_scroll());
    }

    /// One page, leaving a row of overlap for continuity.
    fn page_rows(&self) -> i32 {
        i32::from(self.last_body_height.saturating_sub(1)).max(1)
    }

    fn jump_to(&mut self, section: Section) {
        self.scroll = self.section_tops[section.index()].min(self.max_scroll());
    }

    /// The section the viewport currently sits in: the last one whose
    /// top is at or above the scroll position.
    fn active_section(&self) -> Section {
        let mut active = Section::Home;
        for section in Section::ALL {
            if self.section_tops[section.index()] <= self.scroll {
                active = section;
            }
        }
        active
    }

    // ── Key handling ───────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        // Any keypress dismisses a pending flash message.
        self.flash.borrow_mut().take();

        if key.modifiers.contains(Modifiers::CTRL) {
            if let KeyCode::Char('c') = key.code {
                return Action::Quit;
            }
            return Action::Continue;
        }

        if let Some(highlight) = self.selector {
            self.selector_key(key, highlight);
            return Action::Continue;
        }

        match key.code {
            KeyCode::Char('q') => return Action::Quit,
            KeyCode::Char('t') => self.open_selector(),
            KeyCode::Char(digit @ '1'..='5') => {
                self.jump_to(Section::ALL[digit as usize - '1' as usize]);
            }
            KeyCode::Tab => self.jump_to(self.active_section().next()),
            KeyCode::Up => self.scroll_by(-1),
            KeyCode::Down => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-self.page_rows()),
            KeyCode::PageDown => self.scroll_by(self.page_rows()),
            KeyCode::Home => self.scroll = 0,
            KeyCode::End => self.scroll = self.max_scroll(),
            _ => {}
        }
        Action::Continue
    }

    /// Open the theme selector with the stored variant highlighted.
    fn open_selector(&mut self) {
        let stored = self.store.variant();
        let highlight = AppearanceVariant::ALL
            .iter()
            .position(|&v| v == stored)
            .unwrap_or(0);
        self.selector = Some(highlight);
    }

    fn selector_key(&mut self, key: KeyEvent, highlight: usize) {
        let count = AppearanceVariant::ALL.len();
        match key.code {
            KeyCode::Escape => self.selector = None,
            KeyCode::Up => {
                self.selector = Some(highlight.checked_sub(1).unwrap_or(count - 1));
            }
            KeyCode::Down => self.selector = Some((highlight + 1) % count),
            KeyCode::Enter => self.choose_variant(highlight),
            KeyCode::Char(digit @ '1'..='6') => {
                self.choose_variant(digit as usize - '1' as usize);
            }
            _ => {}
        }
    }

    /// Apply a selector choice and close the selector. The choice goes
    /// through the tag boundary, the same path any external source of
    /// variant names takes.
    fn choose_variant(&mut self, index: usize) {
        self.store.set_tag(AppearanceVariant::ALL[index].as_tag());
        self.selector = None;
    }

    // ── Mouse handling ─────────────────────────────────────────────────

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        self.pointer_cell = (mouse.x, mouse.y);
        // Every mouse report carries a position; all of them are
        // pointer samples as far as the orb is concerned.
        self.tracker
            .push(Vec2::new(f32::from(mouse.x), f32::from(mouse.y)));

        match mouse.kind {
            MouseEventKind::Press(MouseButton::Left) => self.click(mouse.x, mouse.y),
            MouseEventKind::ScrollUp => self.scroll_by(-3),
            MouseEventKind::ScrollDown => self.scroll_by(3),
            _ => {}
        }
    }

    fn click(&mut self, x: u16, y: u16) {
        if y == 0 {
            for section in Section::ALL {
                let (start, end) = self.nav_spans[section.index()];
                if start < end && x >= start && x < end {
                    self.jump_to(section);
                    return;
                }
            }
            return;
        }
        if let Some((start, end, row)) = self.cta_span {
            if y == row && x >= start && x < end {
                self.jump_to(Section::Contact);
            }
        }
    }

    // ── Painting: body sections ────────────────────────────────────────

    fn paint_home(&mut self, p: &mut BodyPainter, accents: &AccentSet, scene: &Scene) {
        p.mark(Section::Home);
        p.blank(1);

        // Title glyphs ramp across the gradient over a soft glow wash.
        let halo = accents.glow.with_alpha(0.2);
        p.gradient_text(4, HERO_TITLE, accents.gradient_start, accents.gradient_end, halo, Attr::BOLD);
        p.newline();
        p.blank(1);

        p.text(4, HERO_SUBTITLE, scene.text, Attr::BOLD, UnderlineStyle::None);
        p.newline();
        p.text(4, HERO_TAGLINE, scene.muted, Attr::ITALIC, UnderlineStyle::None);
        p.newline();
        p.blank(1);

        // Call-to-action: a filled button in the action color. Its span
        // feeds click hit-testing.
        if let Some(y) = p.screen_y() {
            let width = clamp_width(string_width(CTA_LABEL));
            p.frame.paint_text(
                4,
                y,
                CTA_LABEL,
                scene.backdrop,
                accents.action,
                Attr::BOLD,
                UnderlineStyle::None,
                Some(&p.clip),
            );
            self.cta_span = Some((4, 4 + width, y));
        }
        p.newline();
        p.blank(2);
    }

    fn paint_projects(&mut self, p: &mut BodyPainter, accents: &AccentSet, scene: &Scene) {
        p.header(Section::Projects, accents.emphasis_text);

        for project in &PROJECTS {
            let attrs = if project.archived {
                Attr::BOLD | Attr::STRIKETHROUGH
            } else {
                Attr::BOLD
            };
            p.text(2, project.title, accents.emphasis_text, attrs, UnderlineStyle::None);
            if project.archived {
                let x = 3 + clamp_width(string_width(project.title));
                p.text(x, "(archived)", scene.muted, Attr::DIM, UnderlineStyle::None);
            }
            p.newline();

            p.text(4, project.blurb, scene.text, Attr::empty(), UnderlineStyle::None);
            p.newline();

            let tags = project.tags.join(" · ");
            p.text(4, &tags, scene.muted, Attr::DIM, UnderlineStyle::None);
            p.newline();
            p.blank(1);
        }
        p.blank(1);
    }

    fn paint_skills(&mut self, p: &mut BodyPainter, accents: &AccentSet, scene: &Scene) {
        p.header(Section::Skills, accents.emphasis_text);

        const BAR_WIDTH: u16 = 20;
        for group in &SKILL_GROUPS {
            p.text(2, group.name, scene.text, Attr::BOLD, UnderlineStyle::None);
            p.newline();

            for &(skill, level) in group.skills {
                p.text(4, skill, scene.text, Attr::empty(), UnderlineStyle::None);
                let filled = u16::from(level.min(10)) * BAR_WIDTH / 10;
                p.bar(22, BAR_WIDTH, filled, accents.gradient_start, accents.gradient_end, scene.muted);
                p.newline();
            }
            p.blank(1);
        }
        p.blank(1);
    }

    fn paint_experience(&mut self, p: &mut BodyPainter, accents: &AccentSet, scene: &Scene) {
        p.header(Section::Experience, accents.emphasis_text);

        for role in &ROLES {
            p.text(2, role.period, scene.muted, Attr::empty(), UnderlineStyle::None);
            p.text(15, role.title, accents.emphasis_text, Attr::BOLD, UnderlineStyle::None);
            let x = 16 + clamp_width(string_width(role.title));
            p.text(x, "·", scene.muted, Attr::empty(), UnderlineStyle::None);
            p.text(x + 2, role.company, scene.text, Attr::empty(), UnderlineStyle::None);
            p.newline();

            for highlight in role.highlights {
                p.text(15, "·", scene.muted, Attr::DIM, UnderlineStyle::None);
                p.text(17, highlight, scene.muted, Attr::empty(), UnderlineStyle::None);
                p.newline();
            }
            p.blank(1);
        }
        p.blank(1);
    }

    fn paint_contact(&mut self, p: &mut BodyPainter, accents: &AccentSet, scene: &Scene) {
        p.header(Section::Contact, accents.emphasis_text);

        for &(channel, address) in &CHANNELS {
            p.text(2, channel, scene.muted, Attr::empty(), UnderlineStyle::None);
            p.text(14, address, accents.emphasis_text, Attr::empty(), UnderlineStyle::Straight);
            p.newline();
        }
        p.blank(1);
        p.text(2, "© 2026 mara voss · rendered live in your terminal", scene.muted, Attr::DIM, UnderlineStyle::None);
        p.newline();
    }

    // ── Painting: chrome ───────────────────────────────────────────────

    fn paint_nav(&mut self, frame: &mut FrameBuffer, accents: &AccentSet, scene: &Scene) {
        let active = self.active_section();
        let (px, py) = self.pointer_cell;

        frame.paint_text(1, 0, BRAND, accents.emphasis_text, Color::TRANSPARENT, Attr::BOLD, UnderlineStyle::None, None);

        let mut x = clamp_width(string_width(BRAND)) + 4;
        for section in Section::ALL {
            let label = section.label();
            let width = clamp_width(string_width(label));
            let hovered = py == 0 && px >= x && px < x + width;

            let (fg, attrs) = if section == active {
                (accents.emphasis_text, Attr::BOLD)
            } else if hovered {
                (scene.text, Attr::empty())
            } else {
                (scene.muted, Attr::empty())
            };
            let underline = if hovered { UnderlineStyle::Straight } else { UnderlineStyle::None };

            frame.paint_text(x, 0, label, fg, Color::TRANSPARENT, attrs, underline, None);
            self.nav_spans[section.index()] = (x, x + width);
            x += width + 2;
        }
    }

    fn paint_footer(&self, frame: &mut FrameBuffer, y: u16, resolved: ResolvedVariant, scene: &Scene) {
        let left = self
            .flash
            .borrow()
            .clone()
            .unwrap_or_else(|| FOOTER_HINTS.to_string());
        frame.paint_text(1, y, &left, scene.muted, Color::TRANSPARENT, Attr::empty(), UnderlineStyle::None, None);

        let label = resolved.label();
        let x = frame.width().saturating_sub(clamp_width(string_width(label)) + 1);
        frame.paint_text(x, y, label, scene.muted, Color::TRANSPARENT, Attr::DIM, UnderlineStyle::None, None);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn paint_orb(&self, frame: &mut FrameBuffer, clip: &ClipRect, accents: &AccentSet) {
        // Orb coordinates are continuous; painting snaps to cells.
        let pos = self.orb.position();
        let (cx, cy) = (pos.x.round() as i32, pos.y.round() as i32);

        // Halo first; the core overwrites its own tint.
        for (dx, dy) in [(-1_i32, 0_i32), (2, 0), (0, -1), (1, 1)] {
            tint_cell(frame, cx + dx, cy + dy, accents.glow, clip);
        }

        for (dx, fg) in [(0_i32, accents.gradient_start), (1, accents.gradient_end)] {
            let (Ok(x), Ok(y)) = (u16::try_from(cx + dx), u16::try_from(cy)) else {
                continue;
            };
            frame.paint_cell(x, y, '█', fg, accents.glow, Attr::empty(), UnderlineStyle::None, Some(clip));
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn paint_selector(&self, frame: &mut FrameBuffer, highlight: usize, accents: &AccentSet, scene: &Scene) {
        const INNER: u16 = 26;
        let rows = AppearanceVariant::ALL.len() as u16 + 4;
        let w = frame.width();
        let h = frame.height();
        if w < INNER + 2 || h < rows {
            return; // Too small for the overlay; key handling still works.
        }

        let x0 = (w - INNER - 2) / 2;
        let y0 = (h - rows) / 2;

        frame.fill_rect(x0, y0, INNER + 2, rows, scene.backdrop, None);

        let horizontal = "─".repeat(usize::from(INNER));
        frame.paint_text(x0, y0, &format!("╭{horizontal}╮"), accents.emphasis_text, Color::TRANSPARENT, Attr::empty(), UnderlineStyle::None, None);
        frame.paint_text(x0, y0 + rows - 1, &format!("╰{horizontal}╯"), accents.emphasis_text, Color::TRANSPARENT, Attr::empty(), UnderlineStyle::None, None);
        for row in 1..rows - 1 {
            frame.paint_text(x0, y0 + row, "│", accents.emphasis_text, Color::TRANSPARENT, Attr::empty(), UnderlineStyle::None, None);
            frame.paint_text(x0 + INNER + 1, y0 + row, "│", accents.emphasis_text, Color::TRANSPARENT, Attr::empty(), UnderlineStyle::None, None);
        }

        frame.paint_text(x0 + 2, y0 + 1, "appearance", scene.text, Color::TRANSPARENT, Attr::BOLD, UnderlineStyle::None, None);

        let stored = self.store.variant();
        for (i, variant) in AppearanceVariant::ALL.iter().enumerate() {
            let mark = if *variant == stored { '●' } else { ' ' };
            let line = format!(" {}  {} {}", i + 1, mark, variant.label());
            let attrs = if i == highlight { Attr::INVERSE } else { Attr::empty() };
            // Pad to the inner width; the inverse highlight spans the bar.
            let padded = format!("{line:<width$}", width = usize::from(INNER));
            frame.paint_text(x0 + 1, y0 + 3 + i as u16, &padded, scene.text, Color::TRANSPARENT, attrs, UnderlineStyle::None, None);
        }
    }
}

// ─── Body painter ────────────────────────────────────────────────────────────

/// Paints virtual body rows into the viewport, culling whatever is
/// scrolled out, and records where each section starts.
///
/// Virtual row 0 is the top of the Home section. The `row` cursor
/// advances through the whole page on every paint, so section tops stay
/// correct no matter what is visible.
struct BodyPainter<'a> {
    frame: &'a mut FrameBuffer,
    clip: ClipRect,
    scroll: i32,
    row: i32,
    tops: [i32; 5],
}

impl<'a> BodyPainter<'a> {
    fn new(frame: &'a mut FrameBuffer, clip: ClipRect, scroll: i32) -> Self {
        Self {
            frame,
            clip,
            scroll,
            row: 0,
            tops: [0; 5],
        }
    }

    /// Screen row of the current virtual row, if visible.
    fn screen_y(&self) -> Option<u16> {
        let rel = self.row - self.scroll;
        if rel < 0 || rel >= i32::from(self.clip.height) {
            return None;
        }
        u16::try_from(self.clip.y + rel).ok()
    }

    /// Record the current row as `section`'s top.
    fn mark(&mut self, section: Section) {
        self.tops[section.index()] = self.row;
    }

    /// Mark the section and paint its header line.
    fn header(&mut self, section: Section, emphasis: Color) {
        self.mark(section);
        self.text(2, section.label(), emphasis, Attr::BOLD, UnderlineStyle::Straight);
        self.newline();
        self.blank(1);
    }

    /// Paint a run at `x` on the current row. Does not advance.
    fn text(&mut self, x: u16, s: &str, fg: Color, attrs: Attr, underline: UnderlineStyle) {
        if let Some(y) = self.screen_y() {
            self.frame
                .paint_text(x, y, s, fg, Color::TRANSPARENT, attrs, underline, Some(&self.clip));
        }
    }

    /// Paint a run whose glyphs ramp from one color to another.
    #[allow(clippy::cast_precision_loss)]
    fn gradient_text(&mut self, x: u16, s: &str, from: Color, to: Color, bg: Color, attrs: Attr) {
        let Some(y) = self.screen_y() else { return };
        let total = s.chars().count().max(2) - 1;
        let mut col = x;
        for (i, ch) in s.chars().enumerate() {
            let t = i as f32 / total as f32;
            let fg = from.mix(&to, t);
            if self
                .frame
                .paint_cell(col, y, ch, fg, bg, attrs, UnderlineStyle::None, Some(&self.clip))
            {
                col += 1;
            } else {
                break;
            }
        }
    }

    /// Paint a proficiency bar: `filled` gradient cells, the rest muted.
    fn bar(&mut self, x: u16, width: u16, filled: u16, from: Color, to: Color, muted: Color) {
        let Some(y) = self.screen_y() else { return };
        for i in 0..width {
            let (ch, fg) = if i < filled {
                let t = f32::from(i) / f32::from(width.max(2) - 1);
                ('█', from.mix(&to, t))
            } else {
                ('░', muted)
            };
            self.frame
                .paint_cell(x + i, y, ch, fg, Color::TRANSPARENT, Attr::empty(), UnderlineStyle::None, Some(&self.clip));
        }
    }

    /// Advance to the next virtual row.
    fn newline(&mut self) {
        self.row += 1;
    }

    /// Advance past `n` empty rows.
    fn blank(&mut self, n: i32) {
        self.row += n;
    }
}

/// Composite a translucent tint over one cell's background. The glyph
/// and attributes stay, so the halo washes over text without erasing it.
fn tint_cell(frame: &mut FrameBuffer, x: i32, y: i32, tint: Color, clip: &ClipRect) {
    let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
        return;
    };
    if !clip.contains(x, y) {
        return;
    }
    if let Some(cell) = frame.get_mut(x, y) {
        cell.bg = tint.resolve_over(&cell.bg);
    }
}

/// Column width of a string, saturated into `u16`.
fn clamp_width(width: usize) -> u16 {
    u16::try_from(width).unwrap_or(u16::MAX)
}

// ─── App implementation ──────────────────────────────────────────────────────

impl App for Site {
    fn on_event(&mut self, event: &Event) -> Action {
        match event {
            Event::Key(key) => self.handle_key(*key),
            Event::Mouse(mouse) => {
                self.handle_mouse(*mouse);
                Action::Continue
            }
            // The orb parks while the window is unfocused and resumes
            // from wherever it stopped.
            Event::FocusLost => {
                self.orb.stop(&mut self.clock);
                Action::Continue
            }
            Event::FocusGained => {
                let origin = self.orb.position();
                self.orb.start(&mut self.clock, origin);
                Action::Continue
            }
        }
    }

    fn on_resize(&mut self, _size: Size) {
        // The loop already resized the framebuffer; scroll bounds
        // re-clamp on the next paint.
    }

    fn on_tick(&mut self) -> bool {
        if self.clock.take_fired().is_some() {
            return self.orb.step(&mut self.clock, &self.tracker);
        }
        false
    }

    fn paint(&mut self, frame: &mut FrameBuffer) {
        let w = frame.width();
        let h = frame.height();
        if w == 0 || h == 0 {
            return;
        }

        // Resolution is re-queried every frame: a host terminal that
        // flips between dark and light mid-session takes effect on the
        // next paint while the stored preference follows the host.
        let resolved = self.store.resolve();
        let accents = accents(resolved);
        let scene = scene(resolved);

        frame.fill_rect(0, 0, w, h, scene.backdrop, None);

        if h > 2 {
            let body = ClipRect::from_unsigned(0, 1, w, h - 2);
            self.last_body_height = h - 2;
            self.scroll = self.scroll.clamp(0, self.max_scroll());

            let mut p = BodyPainter::new(frame, body, self.scroll);
            self.paint_home(&mut p, accents, scene);
            self.paint_projects(&mut p, accents, scene);
            self.paint_skills(&mut p, accents, scene);
            self.paint_experience(&mut p, accents, scene);
            self.paint_contact(&mut p, accents, scene);
            self.section_tops = p.tops;
            self.body_rows = p.row;

            self.paint_orb(frame, &body, accents);
        }

        self.paint_nav(frame, accents, scene);
        if h >= 2 {
            self.paint_footer(frame, h - 1, resolved, scene);
        }
        if let Some(highlight) = self.selector {
            self.paint_selector(frame, highlight, accents, scene);
        }
    }
}

// ─── Entry point ─────────────────────────────────────────────────────────────

fn main() {
    let mut event_loop = EventLoop::new().unwrap_or_else(|e| {
        eprintln!("wisp: failed to initialize terminal: {e}");
        process::exit(1);
    });

    let mut site = Site::new(event_loop.size());

    if let Err(e) = event_loop.run(&mut site) {
        eprintln!("wisp: {e}");
        process::exit(1);
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use wisp_theme::{Brightness, HostSignal};

    use super::*;

    // ── Helpers ────────────────────────────────────────────────────────

    struct FixedSignal(Brightness);

    impl HostSignal for FixedSignal {
        fn brightness(&self) -> Brightness {
            self.0
        }
    }

    /// A site over a temp-file store and a dark host, 100×40.
    fn test_site() -> (Site, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = ThemeStore::open(
            dir.path().join("appearance"),
            Box::new(FixedSignal(Brightness::Dark)),
        );
        let site = Site::with_store(store, Size { cols: 100, rows: 40 });
        (site, dir)
    }

    /// A test site that has painted once, so section tops and nav spans
    /// are populated.
    fn painted_site() -> (Site, TempDir) {
        let (mut site, dir) = test_site();
        let mut frame = FrameBuffer::new(100, 40);
        site.paint(&mut frame);
        (site, dir)
    }

    fn press(ch: char) -> Event {
        Event::Key(KeyEvent {
            code: KeyCode::Char(ch),
            modifiers: Modifiers::empty(),
        })
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: Modifiers::empty(),
        })
    }

    fn ctrl(ch: char) -> Event {
        Event::Key(KeyEvent {
            code: KeyCode::Char(ch),
            modifiers: Modifiers::CTRL,
        })
    }

    fn mouse(kind: MouseEventKind, x: u16, y: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            x,
            y,
            modifiers: Modifiers::empty(),
        })
    }

    fn feed(site: &mut Site, events: &[Event]) {
        for event in events {
            site.on_event(event);
        }
    }

    /// The visible text of one frame row.
    fn row_text(frame: &FrameBuffer, y: u16) -> String {
        frame
            .row(y)
            .map(|row| row.iter().filter_map(|cell| cell.character()).collect())
            .unwrap_or_default()
    }

    // ── Quitting ───────────────────────────────────────────────────────

    #[test]
    fn q_quits() {
        let (mut site, _dir) = test_site();
        assert_eq!(site.on_event(&press('q')), Action::Quit);
    }

    #[test]
    fn ctrl_c_quits() {
        let (mut site, _dir) = test_site();
        assert_eq!(site.on_event(&ctrl('c')), Action::Quit);
    }

    #[test]
    fn other_keys_continue() {
        let (mut site, _dir) = test_site();
        assert_eq!(site.on_event(&press('x')), Action::Continue);
    }

    // ── Theme selector ─────────────────────────────────────────────────

    #[test]
    fn t_opens_the_selector_on_the_stored_variant() {
        let (mut site, _dir) = test_site();
        site.on_event(&press('t'));
        // Fresh store: host-preference, last entry in selector order.
        assert_eq!(site.selector, Some(5));
    }

    #[test]
    fn escape_closes_without_changing_anything() {
        let (mut site, _dir) = test_site();
        feed(&mut site, &[press('t'), key(KeyCode::Escape)]);
        assert_eq!(site.selector, None);
        assert_eq!(site.store.variant(), AppearanceVariant::HostPreference);
    }

    #[test]
    fn digit_selects_and_persists() {
        let (mut site, _dir) = test_site();
        feed(&mut site, &[press('t'), press('3')]);
        assert_eq!(site.selector, None);
        assert_eq!(site.store.variant(), AppearanceVariant::HighContrast);
        assert!(site.store.path().exists());
    }

    #[test]
    fn enter_selects_the_highlighted_entry() {
        let (mut site, _dir) = test_site();
        feed(&mut site, &[press('t')]);
        // From host-preference (index 5), Down wraps to Light, Down
        // again lands on Dark.
        feed(&mut site, &[key(KeyCode::Down), key(KeyCode::Down), key(KeyCode::Enter)]);
        assert_eq!(site.store.variant(), AppearanceVariant::Dark);
    }

    #[test]
    fn up_wraps_from_the_top() {
        let (mut site, _dir) = test_site();
        feed(&mut site, &[press('t'), press('1')]);
        feed(&mut site, &[press('t')]); // reopen on Light, index 0
        assert_eq!(site.selector, Some(0));
        feed(&mut site, &[key(KeyCode::Up)]);
        assert_eq!(site.selector, Some(5));
    }

    #[test]
    fn selection_during_animation_leaves_the_orb_alone() {
        let (mut site, _dir) = test_site();
        feed(&mut site, &[mouse(MouseEventKind::Move, 90, 5)]);
        site.on_tick();
        let mid_flight = site.orb.position();
        feed(&mut site, &[press('t'), press('4')]);
        assert_eq!(site.orb.position(), mid_flight);
        assert!(site.orb.is_running());
    }

    // ── Theme flash ────────────────────────────────────────────────────

    #[test]
    fn flash_announces_a_real_resolution_change() {
        let (mut site, _dir) = test_site();
        feed(&mut site, &[press('t'), press('3')]);
        assert_eq!(
            site.flash.borrow().as_deref(),
            Some("appearance: High contrast")
        );
    }

    #[test]
    fn flash_skips_when_resolution_is_unchanged() {
        let (mut site, _dir) = test_site();
        // Dark host: host-preference already resolves dark, so storing
        // Dark notifies but does not change the resolution.
        feed(&mut site, &[press('t'), press('2')]);
        assert!(site.flash.borrow().is_none());
    }

    #[test]
    fn next_keypress_dismisses_the_flash() {
        let (mut site, _dir) = test_site();
        feed(&mut site, &[press('t'), press('1')]);
        assert!(site.flash.borrow().is_some());
        feed(&mut site, &[key(KeyCode::Down)]);
        assert!(site.flash.borrow().is_none());
    }

    // ── Navigation & scrolling ─────────────────────────────────────────

    #[test]
    fn sections_are_laid_out_in_order() {
        let (site, _dir) = painted_site();
        for pair in site.section_tops.windows(2) {
            assert!(pair[0] < pair[1], "tops out of order: {:?}", site.section_tops);
        }
        assert!(site.body_rows > site.section_tops[4]);
    }

    #[test]
    fn digits_jump_to_section_tops() {
        let (mut site, _dir) = painted_site();
        site.on_event(&press('4'));
        assert_eq!(site.scroll, site.section_tops[3].min(site.max_scroll()));
        assert!(site.scroll > 0);
    }

    #[test]
    fn tab_cycles_to_the_next_section() {
        let (mut site, _dir) = painted_site();
        site.on_event(&key(KeyCode::Tab));
        assert_eq!(site.scroll, site.section_tops[1]);
        site.on_event(&key(KeyCode::Tab));
        assert_eq!(site.scroll, site.section_tops[2]);
    }

    #[test]
    fn arrows_scroll_one_row_and_clamp_at_the_top() {
        let (mut site, _dir) = painted_site();
        site.on_event(&key(KeyCode::Up));
        assert_eq!(site.scroll, 0);
        site.on_event(&key(KeyCode::Down));
        assert_eq!(site.scroll, 1);
    }

    #[test]
    fn end_jumps_to_the_bottom_and_clamps() {
        let (mut site, _dir) = painted_site();
        site.on_event(&key(KeyCode::End));
        assert_eq!(site.scroll, site.max_scroll());
        site.on_event(&key(KeyCode::PageDown));
        assert_eq!(site.scroll, site.max_scroll(), "page-down past the end clamps");
        site.on_event(&key(KeyCode::Home));
        assert_eq!(site.scroll, 0);
    }

    #[test]
    fn wheel_scrolls_three_rows() {
        let (mut site, _dir) = painted_site();
        site.on_event(&mouse(MouseEventKind::ScrollDown, 50, 20));
        assert_eq!(site.scroll, 3);
        site.on_event(&mouse(MouseEventKind::ScrollUp, 50, 20));
        assert_eq!(site.scroll, 0);
    }

    #[test]
    fn nav_click_jumps_to_its_section() {
        let (mut site, _dir) = painted_site();
        let (start, end) = site.nav_spans[Section::Skills.index()];
        assert!(start < end, "nav spans recorded during paint");
        site.on_event(&mouse(MouseEventKind::Press(MouseButton::Left), start, 0));
        assert_eq!(site.scroll, site.section_tops[2]);
    }

    #[test]
    fn cta_click_jumps_to_contact() {
        let (mut site, _dir) = painted_site();
        let (start, _, row) = site.cta_span.expect("CTA span recorded during paint");
        site.on_event(&mouse(MouseEventKind::Press(MouseButton::Left), start, row));
        assert_eq!(site.scroll, site.section_tops[4].min(site.max_scroll()));
    }

    #[test]
    fn active_section_follows_the_scroll_position() {
        let (mut site, _dir) = painted_site();
        assert_eq!(site.active_section(), Section::Home);
        site.scroll = site.section_tops[3];
        assert_eq!(site.active_section(), Section::Experience);
        site.scroll = site.section_tops[3] + 1;
        assert_eq!(site.active_section(), Section::Experience);
    }

    // ── Pointer & orb ──────────────────────────────────────────────────

    #[test]
    fn mouse_reports_feed_the_tracker() {
        let (mut site, _dir) = test_site();
        site.on_event(&mouse(MouseEventKind::Move, 12, 34));
        assert_eq!(site.tracker.position(), Vec2::new(12.0, 34.0));
        site.on_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 40, 8));
        assert_eq!(site.tracker.position(), Vec2::new(40.0, 8.0));
    }

    #[test]
    fn ticks_move_the_orb_toward_the_pointer() {
        let (mut site, _dir) = test_site();
        let target = Vec2::new(90.0, 35.0);
        site.on_event(&mouse(MouseEventKind::Move, 90, 35));

        let before = site.orb.position().distance(target);
        assert!(site.on_tick(), "orb moved, repaint due");
        let after = site.orb.position().distance(target);
        assert!(after < before);
    }

    #[test]
    fn parked_pointer_means_clean_ticks() {
        let (mut site, _dir) = test_site();
        // Orb and pointer both start at the screen center.
        assert!(!site.on_tick(), "converged orb requests no repaint");
    }

    #[test]
    fn focus_loss_parks_the_orb() {
        let (mut site, _dir) = test_site();
        site.on_event(&mouse(MouseEventKind::Move, 90, 35));
        site.on_event(&Event::FocusLost);
        assert!(!site.orb.is_running());
        assert!(!site.on_tick(), "no ticks while parked");

        site.on_event(&Event::FocusGained);
        assert!(site.orb.is_running());
        assert!(site.on_tick(), "chase resumes");
    }

    #[test]
    fn focus_gain_while_running_is_harmless() {
        let (mut site, _dir) = test_site();
        let position = site.orb.position();
        site.on_event(&Event::FocusGained);
        assert!(site.orb.is_running());
        assert_eq!(site.orb.position(), position);
    }

    // ── Painting ───────────────────────────────────────────────────────

    #[test]
    fn nav_row_names_every_section() {
        let (mut site, _dir) = test_site();
        let mut frame = FrameBuffer::new(100, 40);
        site.paint(&mut frame);
        let nav = row_text(&frame, 0);
        for section in Section::ALL {
            assert!(nav.contains(section.label()), "nav missing {}", section.label());
        }
    }

    #[test]
    fn footer_names_the_resolved_variant() {
        let (mut site, _dir) = test_site();
        let mut frame = FrameBuffer::new(100, 40);
        site.paint(&mut frame);
        assert!(row_text(&frame, 39).contains("Dark"));
    }

    #[test]
    fn selector_overlay_lists_all_six_variants() {
        let (mut site, _dir) = test_site();
        site.on_event(&press('t'));
        let mut frame = FrameBuffer::new(100, 40);
        site.paint(&mut frame);

        let screen: Vec<String> = (0..40).map(|y| row_text(&frame, y)).collect();
        for variant in AppearanceVariant::ALL {
            assert!(
                screen.iter().any(|row| row.contains(variant.label())),
                "selector missing {}",
                variant.label()
            );
        }
    }

    #[test]
    fn archived_project_is_on_the_page() {
        let (mut site, _dir) = test_site();
        let mut frame = FrameBuffer::new(100, 60);
        site.paint(&mut frame);
        let screen: Vec<String> = (0..60).map(|y| row_text(&frame, y)).collect();
        assert!(screen.iter().any(|row| row.contains("glowbox")));
        assert!(screen.iter().any(|row| row.contains("(archived)")));
    }

    #[test]
    fn backdrop_follows_the_selected_variant() {
        let (mut site, _dir) = test_site();
        feed(&mut site, &[press('t'), press('3')]); // high contrast
        let mut frame = FrameBuffer::new(100, 40);
        site.paint(&mut frame);

        let expected = scene(ResolvedVariant::HighContrast).backdrop.to_cell_color();
        let corner = frame.get(99, 20).unwrap();
        assert_eq!(corner.bg, expected);
    }

    #[test]
    fn orb_paints_at_its_position() {
        let (mut site, _dir) = test_site();
        // Center of a 100×40 screen; the orb starts parked there.
        let pos = site.orb.position();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (cx, cy) = (pos.x.round() as u16, pos.y.round() as u16);

        let mut frame = FrameBuffer::new(100, 40);
        site.paint(&mut frame);
        assert_eq!(frame.get(cx, cy).unwrap().character(), Some('█'));
        assert_eq!(frame.get(cx + 1, cy).unwrap().character(), Some('█'));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let (mut site, _dir) = test_site();
        for (w, h) in [(0, 0), (1, 1), (5, 2), (80, 1)] {
            let mut frame = FrameBuffer::new(w, h);
            site.paint(&mut frame);
        }
    }

    #[test]
    fn resize_reclamps_scroll_on_the_next_paint() {
        let (mut site, _dir) = painted_site();
        site.on_event(&key(KeyCode::End));
        let deep = site.scroll;
        assert!(deep > 0);

        // A much taller window fits everything; scroll snaps back.
        let mut frame = FrameBuffer::new(100, 200);
        site.paint(&mut frame);
        assert!(site.scroll < deep);
    }
}
