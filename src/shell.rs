//! Line-based interactive menu over a [`StockIndex`].
//!
//! Reads commands from any `BufRead` and writes to any `Write`, so sessions
//! can be driven from tests as well as from a terminal. User mistakes are
//! reported and the menu is shown again; only I/O failures end the session
//! with an error.

use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;

use crate::domain::error::StockError;
use crate::domain::stock_index::StockIndex;
use crate::domain::symbols::normalize_symbol;

pub const MENU: &str = "
  1 - Calculate the dividend yield [symbol, price]
  2 - Calculate the P/E ratio [symbol, price]
  3 - Buy shares [symbol, quantity, price]
  4 - Sell shares [symbol, quantity, price]
  5 - Calculate the volume weighted stock price [symbol]
  6 - Calculate the all share index
  7 - List stocks
  8 - Exit
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    DividendYield,
    PeRatio,
    Buy,
    Sell,
    Vwsp,
    AllShareIndex,
    List,
    Exit,
}

impl Command {
    fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "1" => Some(Command::DividendYield),
            "2" => Some(Command::PeRatio),
            "3" => Some(Command::Buy),
            "4" => Some(Command::Sell),
            "5" => Some(Command::Vwsp),
            "6" => Some(Command::AllShareIndex),
            "7" => Some(Command::List),
            "8" | "q" | "quit" | "exit" => Some(Command::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum ShellError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Stock(#[from] StockError),

    #[error("{field} must be an integer, got '{value}'")]
    NotAnInteger { field: &'static str, value: String },

    #[error("end of input")]
    EndOfInput,
}

/// Run the menu until the user exits or input ends.
pub fn run_shell<R: BufRead, W: Write>(
    index: &mut StockIndex,
    input: R,
    output: W,
) -> io::Result<()> {
    Shell {
        index,
        input,
        output,
    }
    .run()
}

struct Shell<'a, R, W> {
    index: &'a mut StockIndex,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<'_, R, W> {
    fn run(mut self) -> io::Result<()> {
        writeln!(self.output, "{}", self.index.name())?;
        loop {
            write!(self.output, "{MENU}")?;
            let line = match self.prompt("> ") {
                Ok(line) => line,
                Err(ShellError::Io(e)) => return Err(e),
                Err(_) => break,
            };
            let Some(command) = Command::parse(&line) else {
                writeln!(self.output, "Command not supported: {}", line.trim())?;
                continue;
            };
            match self.execute(command) {
                Ok(ControlFlow::Continue(())) => {}
                Ok(ControlFlow::Break(())) => break,
                Err(ShellError::Io(e)) => return Err(e),
                Err(ShellError::EndOfInput) => break,
                Err(e) => {
                    tracing::debug!(?command, error = %e, "command failed");
                    writeln!(self.output, "error: {e}")?;
                }
            }
        }
        self.output.flush()
    }

    fn execute(&mut self, command: Command) -> Result<ControlFlow<()>, ShellError> {
        match command {
            Command::DividendYield => {
                let symbol = self.prompt_symbol()?;
                let price = parse_integer("price", &self.prompt_field("price")?)?;
                let value = self
                    .index
                    .get_stock(&symbol)?
                    .calculate_dividend_yield(price)?;
                writeln!(self.output, "Dividend yield: {value}")?;
            }
            Command::PeRatio => {
                let symbol = self.prompt_symbol()?;
                let price = parse_integer("price", &self.prompt_field("price")?)?;
                let value = self.index.get_stock(&symbol)?.calculate_pe_ratio(price)?;
                writeln!(self.output, "P/E ratio: {value}")?;
            }
            Command::Buy | Command::Sell => {
                // Read every field before validating so a bad value does not
                // leave answers behind to be taken as menu commands.
                let symbol = self.prompt_symbol()?;
                let quantity = self.prompt_field("quantity")?;
                let price = self.prompt_field("price")?;
                let quantity = parse_integer("quantity", &quantity)?;
                let price = parse_integer("price", &price)?;
                let stock = self.index.get_stock_mut(&symbol)?;
                let trade = if command == Command::Buy {
                    stock.buy(quantity, price)?
                } else {
                    stock.sell(quantity, price)?
                };
                writeln!(self.output, "Recorded {symbol} {trade}")?;
            }
            Command::Vwsp => {
                let symbol = self.prompt_symbol()?;
                let value = self.index.get_stock(&symbol)?.calculate_vwsp();
                writeln!(self.output, "VWSP: {value}")?;
            }
            Command::AllShareIndex => {
                let value = self.index.calculate_all_share_index()?;
                writeln!(
                    self.output,
                    "{} all share index: {value}",
                    self.index.name()
                )?;
            }
            Command::List => write_stock_table(self.index, &mut self.output)?,
            Command::Exit => return Ok(ControlFlow::Break(())),
        }
        Ok(ControlFlow::Continue(()))
    }

    fn prompt(&mut self, label: &str) -> Result<String, ShellError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ShellError::EndOfInput);
        }
        Ok(line)
    }

    fn prompt_symbol(&mut self) -> Result<String, ShellError> {
        Ok(normalize_symbol(&self.prompt_field("symbol")?))
    }

    fn prompt_field(&mut self, field: &str) -> Result<String, ShellError> {
        self.prompt(&format!("  {field}: "))
    }
}

fn parse_integer(field: &'static str, raw: &str) -> Result<i64, ShellError> {
    let value = raw.trim();
    value.parse().map_err(|_| ShellError::NotAnInteger {
        field,
        value: value.to_string(),
    })
}

/// Reference data and trade counts, one row per stock.
pub fn write_stock_table<W: Write>(index: &StockIndex, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "{:<6} {:<10} {:>8} {:>9} {:>6} {:>7}",
        "SYMBOL", "TYPE", "LAST DIV", "FIXED DIV", "PAR", "TRADES"
    )?;
    for stock in index.stocks() {
        let fixed = stock
            .fixed_dividend_percent()
            .map(|pct| format!("{pct}%"))
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{:<6} {:<10} {:>8} {:>9} {:>6} {:>7}",
            stock.symbol(),
            stock.kind(),
            stock.last_dividend(),
            fixed,
            stock.par_value(),
            stock.trades().len()
        )?;
    }
    Ok(())
}
