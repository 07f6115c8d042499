pub trait StatusLine {
    fn is_high(&self) -> bool {
        self.level() == Level::High
    }

    fn level(&self) -> Level;
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum Level {
    #[default]
    Low,
    High,
}

impl Level {
    pub fn toggled(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}
