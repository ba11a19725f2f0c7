/// Previously accepted commands, walked with the arrow keys.
#[derive(Debug, Default)]
pub struct InputHistory {
    commands: Vec<String>,
    cursor: Option<usize>,
}

impl InputHistory {
    /// Remember an accepted command. Repeating the last one is not recorded
    /// twice. Resets navigation.
    pub fn record(&mut self, command: &str) {
        if self.commands.last().map(String::as_str) != Some(command) {
            self.commands.push(command.to_string());
        }
        self.cursor = None;
    }

    /// ArrowUp: step back towards the oldest command.
    pub fn older(&mut self) -> Option<&str> {
        let last = self.commands.len().checked_sub(1)?;
        let index = match self.cursor {
            None => last,
            Some(index) => index.saturating_sub(1),
        };
        self.cursor = Some(index);
        self.commands.get(index).map(String::as_str)
    }

    /// ArrowDown: step forward. Walking past the newest command yields an
    /// empty prompt; with no walk in progress there is nothing to do.
    pub fn newer(&mut self) -> Option<&str> {
        let index = self.cursor? + 1;
        if index >= self.commands.len() {
            self.cursor = None;
            return Some("");
        }
        self.cursor = Some(index);
        self.commands.get(index).map(String::as_str)
    }
}
