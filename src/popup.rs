/// "Contact developer" overlay.  Independent of the game: it only knows
/// whether it is open and what to show.

#[derive(Clone, Debug, PartialEq)]
pub struct ContactCard {
    pub name: String,
    pub website: String,
    pub email: String,
    pub github: String,
}

impl Default for ContactCard {
    fn default() -> Self {
        ContactCard {
            name: "Prince Kouamé".to_string(),
            website: "www.princekouame.com".to_string(),
            email: "hello@princekouame.com".to_string(),
            github: "github.com/kouame09".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DeveloperPopup {
    pub card: ContactCard,
    open: bool,
}

impl DeveloperPopup {
    pub fn new(card: ContactCard) -> Self {
        DeveloperPopup { card, open: false }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Returns whether the popup was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            "Developer Information".to_string(),
            String::new(),
            format!("Name:    {}", self.card.name),
            format!("Website: {}", self.card.website),
            format!("Email:   {}", self.card.email),
            format!("GitHub:  {}", self.card.github),
            String::new(),
            "[Esc] Close".to_string(),
        ]
    }
}
