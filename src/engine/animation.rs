// Sprite clip selection

/// Every clip on the shared "assets" sheet
pub const KIRB_SHEET: &[&str] = &[
    "kirbIdle",
    "kirbInhaling",
    "kirbFull",
    "kirbInhaleEffect",
    "shootingStar",
    "flame",
    "guyWalk",
    "bird",
];

/// Tracks which clip of one sprite sheet an entity shows, and which way it faces
#[derive(Debug, Clone, Copy)]
pub struct AnimationPlayer {
    sheet: &'static [&'static str],
    clip: Option<&'static str>,
    flip_horizontal: bool,
}

impl AnimationPlayer {
    pub fn new(sheet: &'static [&'static str]) -> Self {
        Self {
            sheet,
            clip: None,
            flip_horizontal: false,
        }
    }

    pub fn kirb_sheet() -> Self {
        Self::new(KIRB_SHEET)
    }

    /// Start on a given clip
    pub fn starting_with(mut self, name: &str) -> Self {
        self.play(name);
        self
    }

    /// Switch to `name`; names missing from the sheet are ignored
    pub fn play(&mut self, name: &str) {
        match self.sheet.iter().copied().find(|clip| *clip == name) {
            Some(clip) => self.clip = Some(clip),
            None => log::warn!("Ignoring unknown animation '{}'", name),
        }
    }

    pub fn set_flip_horizontal(&mut self, flip: bool) {
        self.flip_horizontal = flip;
    }

    pub fn is_flipped_horizontal(&self) -> bool {
        self.flip_horizontal
    }

    /// Name of the clip being shown, empty before the first `play`
    pub fn current_animation(&self) -> &str {
        self.clip.unwrap_or("")
    }
}
