//! Interactive session loop
//!
//! Reads prompt lines, runs them through `update`, and executes the
//! returned commands. Redraws are coalesced so one input line prints the
//! table at most once.

use std::io::{BufRead, Write};

use anyhow::Result;

use ledger_grid::commands::Cmd;
use ledger_grid::grid::render_table;
use ledger_grid::messages::{AppMsg, Msg};
use ledger_grid::model::AppModel;
use ledger_grid::update::update;

use super::input::{parse_command, Command, HELP};

pub struct App<W: Write> {
    pub model: AppModel,
    out: W,
    needs_redraw: bool,
    quit: bool,
}

impl<W: Write> App<W> {
    pub fn new(model: AppModel, out: W) -> Self {
        Self {
            model,
            out,
            needs_redraw: false,
            quit: false,
        }
    }

    /// Run until `quit` or end of input
    pub fn run(&mut self, input: impl BufRead) -> Result<()> {
        self.draw()?;
        self.prompt()?;

        for line in input.lines() {
            let line = line?;
            self.handle_line(&line)?;
            if self.quit {
                break;
            }
            self.prompt()?;
        }
        Ok(())
    }

    fn prompt(&mut self) -> Result<()> {
        write!(self.out, "> ")?;
        self.out.flush()?;
        Ok(())
    }

    /// Handle one prompt line
    pub fn handle_line(&mut self, line: &str) -> Result<()> {
        match parse_command(line, self.model.grid.schema()) {
            Ok(Command::Empty) => {}
            Ok(Command::Show) => self.needs_redraw = true,
            Ok(Command::Help) => writeln!(self.out, "{}", HELP)?,
            Ok(Command::Msg(msg)) => self.dispatch(msg)?,
            Err(e) => writeln!(self.out, "error: {}", e)?,
        }

        if self.needs_redraw && !self.quit {
            self.draw()?;
        }
        Ok(())
    }

    /// Send a message through `update` and run the resulting command
    pub fn dispatch(&mut self, msg: Msg) -> Result<()> {
        if let Some(cmd) = update(&mut self.model, msg) {
            self.process_cmd(cmd)?;
        }
        Ok(())
    }

    fn process_cmd(&mut self, cmd: Cmd) -> Result<()> {
        match cmd {
            Cmd::None => {}
            Cmd::Redraw => self.needs_redraw = true,
            Cmd::ReloadRecords => {
                self.needs_redraw = true;
                self.dispatch(Msg::App(AppMsg::StoreChanged))?;
            }
            Cmd::SaveRecords { path } => {
                let result = self
                    .model
                    .store
                    .save_json(&path)
                    .map_err(|e| e.to_string());
                self.dispatch(Msg::App(AppMsg::SaveCompleted(result)))?;
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd)?;
                }
            }
            Cmd::Quit => self.quit = true,
        }
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let table = render_table(&self.model.grid, &self.model.render_options());
        write!(self.out, "{}", table)?;
        if let Some(status) = self.model.status.take() {
            writeln!(self.out, "-- {}", status)?;
        }
        self.needs_redraw = false;
        Ok(())
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }
}
