//! DOM-independent state behind the side drawer and mute toggle.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    About,
    Projects,
    Experience,
    Contact,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::About,
        Section::Projects,
        Section::Experience,
        Section::Contact,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Section::About => "about",
            Section::Projects => "projects",
            Section::Experience => "experience",
            Section::Contact => "contact",
        }
    }

    pub fn button_id(self) -> String {
        format!("btn-{}", self.slug())
    }

    pub fn panel_id(self) -> String {
        format!("section-{}", self.slug())
    }
}

/// Where a document click landed relative to the drawer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawerClick {
    Button(Section),
    Close,
    Inside,
    Outside,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Drawer {
    open: Option<Section>,
}

impl Drawer {
    pub fn open_section(&self) -> Option<Section> {
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Apply a click; returns true if the visible state changed.
    pub fn click(&mut self, click: DrawerClick) -> bool {
        let before = self.open;
        match click {
            DrawerClick::Button(s) => self.open = Some(s),
            DrawerClick::Close | DrawerClick::Outside => self.open = None,
            DrawerClick::Inside => {}
        }
        before != self.open
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MuteToggle {
    pub muted: bool,
}

impl MuteToggle {
    pub fn toggle(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Id of the icon that should be visible.
    pub fn visible_icon(&self) -> &'static str {
        if self.muted {
            "icon-sound-off"
        } else {
            "icon-sound-on"
        }
    }

    pub fn hidden_icon(&self) -> &'static str {
        if self.muted {
            "icon-sound-on"
        } else {
            "icon-sound-off"
        }
    }
}
