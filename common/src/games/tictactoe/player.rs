use super::types::Mark;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    marker: Mark,
    wins: u32,
}

impl Player {
    pub fn new(name: impl Into<String>, marker: Mark) -> Self {
        Self {
            name: name.into(),
            marker,
            wins: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn marker(&self) -> Mark {
        self.marker
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn set_wins(&mut self, wins: u32) {
        self.wins = wins;
    }
}
