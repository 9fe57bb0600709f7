//! Linear slide deck controlled by gestures or arrow keys.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slide {
    pub title: &'static str,
    pub bullets: &'static [&'static str],
}

pub const DECK: [Slide; 5] = [
    Slide {
        title: "Gesture Control",
        bullets: &["Drive this deck with your hand", "No clicker required"],
    },
    Slide {
        title: "How It Works",
        bullets: &[
            "The camera streams to the recognition server",
            "The client polls for the latest gesture",
        ],
    },
    Slide {
        title: "Navigation",
        bullets: &[
            "One finger up: next slide",
            "Fist: previous slide",
            "Open palm: play / pause",
        ],
    },
    Slide {
        title: "Other Modes",
        bullets: &["Whiteboard drawing", "Rock-paper-scissors, basketball, spells"],
    },
    Slide {
        title: "Thank You",
        bullets: &["Questions?"],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideAction {
    Ready,
    Next,
    Previous,
    Started,
    Paused,
}

impl SlideAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::Next => "Next Slide",
            Self::Previous => "Previous Slide",
            Self::Started => "Started",
            Self::Paused => "Paused",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Presentation {
    current: usize,
    total: usize,
    playing: bool,
    last_action: SlideAction,
}

impl Presentation {
    pub fn new(total: usize) -> Self {
        Self {
            current: 1,
            total: total.max(1),
            playing: false,
            last_action: SlideAction::Ready,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn last_action(&self) -> SlideAction {
        self.last_action
    }

    pub fn status(&self) -> &'static str {
        if self.playing {
            "Running"
        } else {
            "Paused"
        }
    }

    pub fn slide(&self) -> Option<&'static Slide> {
        DECK.get(self.current - 1)
    }

    /// Back to the first slide with status "Ready"; play state is kept.
    pub fn init(&mut self) {
        self.current = 1;
        self.last_action = SlideAction::Ready;
    }

    pub fn advance(&mut self) -> bool {
        if self.current >= self.total {
            return false;
        }
        self.current += 1;
        self.last_action = SlideAction::Next;
        true
    }

    pub fn retreat(&mut self) -> bool {
        if self.current <= 1 {
            return false;
        }
        self.current -= 1;
        self.last_action = SlideAction::Previous;
        true
    }

    pub fn toggle(&mut self) {
        self.playing = !self.playing;
        self.last_action = if self.playing {
            SlideAction::Started
        } else {
            SlideAction::Paused
        };
    }
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new(DECK.len())
    }
}
