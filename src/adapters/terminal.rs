use crate::core::controller::{InteractionController, Outcome, Theme, UserEvent, KMS_STEP};
use crate::domain::ports::PriceModel;
use crate::utils::format::group_thousands;
use std::io::{self, BufRead, Write};

pub const TITLE: &str = "Car Price Predictor";
pub const DESCRIPTION: &str =
    "Predict the resale price of a car based on company, model, year, fuel type and kilometres driven.";

const HELP: &str = "\
Commands:
  show                  show the form
  company <name|#>      select a company
  model <name|#>        select a car model of the selected company
  year <year|#>         select the year of purchase
  fuel <name|#>         select the fuel type
  kms <n>               enter kilometres driven (0 or more)
  + / -                 step kilometres driven by 500
  theme                 toggle dark mode
  predict               predict the price
  help                  show this help
  quit                  leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Show,
    Help,
    Quit,
    Company(String),
    Model(String),
    Year(String),
    Fuel(String),
    Kms(String),
    StepUp,
    StepDown,
    Theme,
    Predict,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (verb, arg) = match line.split_once(char::is_whitespace) {
        Some((verb, arg)) => (verb, arg.trim().to_string()),
        None => (line, String::new()),
    };

    match verb.to_ascii_lowercase().as_str() {
        "" => Command::Empty,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "company" => Command::Company(arg),
        "model" => Command::Model(arg),
        "year" => Command::Year(arg),
        "fuel" => Command::Fuel(arg),
        "kms" => Command::Kms(arg),
        "+" => Command::StepUp,
        "-" => Command::StepDown,
        "theme" | "dark" => Command::Theme,
        "predict" => Command::Predict,
        _ => Command::Unknown(line.to_string()),
    }
}

/// Picks an option by exact value or by its 1-based position in the list.
fn resolve_option(options: &[String], arg: &str) -> String {
    if options.iter().any(|option| option == arg) {
        return arg.to_string();
    }
    match arg.parse::<usize>() {
        Ok(index) if (1..=options.len()).contains(&index) => options[index - 1].clone(),
        _ => arg.to_string(),
    }
}

fn resolve_year(years: &[i32], arg: &str) -> Option<i32> {
    let value = arg.parse::<i64>().ok()?;
    if let Ok(year) = i32::try_from(value) {
        if years.contains(&year) {
            return Some(year);
        }
    }
    match usize::try_from(value) {
        Ok(index) if (1..=years.len()).contains(&index) => Some(years[index - 1]),
        _ => i32::try_from(value).ok(),
    }
}

struct Palette {
    heading: &'static str,
    label: &'static str,
    success: &'static str,
    error: &'static str,
    muted: &'static str,
    reset: &'static str,
}

impl Palette {
    const PLAIN: Palette = Palette {
        heading: "",
        label: "",
        success: "",
        error: "",
        muted: "",
        reset: "",
    };

    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                heading: "\x1b[1;34m",
                label: "\x1b[38;5;238m",
                success: "\x1b[32m",
                error: "\x1b[31m",
                muted: "\x1b[2m",
                reset: "\x1b[0m",
            },
            Theme::Dark => Self {
                heading: "\x1b[1;97m",
                label: "\x1b[38;5;189m",
                success: "\x1b[38;5;157m",
                error: "\x1b[38;5;210m",
                muted: "\x1b[38;5;245m",
                reset: "\x1b[0m",
            },
        }
    }
}

/// Line-oriented front end for the prediction form.
///
/// Escape codes are only written when `color` is on; piped output stays plain.
pub struct TerminalSession<'a, M: PriceModel, R: BufRead, W: Write> {
    controller: InteractionController<'a, M>,
    input: R,
    output: W,
    color: bool,
}

impl<'a, M: PriceModel, R: BufRead, W: Write> TerminalSession<'a, M, R, W> {
    pub fn new(controller: InteractionController<'a, M>, input: R, output: W) -> Self {
        Self {
            controller,
            input,
            output,
            color: true,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn palette(&self) -> Palette {
        if self.color {
            Palette::for_theme(self.controller.theme())
        } else {
            Palette::PLAIN
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn run(&mut self) -> io::Result<()> {
        self.render_banner()?;
        self.render_form()?;

        let mut line = String::new();
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                break;
            }

            let command = parse_command(&line);
            if command == Command::Quit {
                break;
            }
            self.execute(command)?;
        }

        tracing::debug!("Terminal session finished");
        Ok(())
    }

    fn execute(&mut self, command: Command) -> io::Result<()> {
        let form = self.controller.form();
        let catalog = self.controller.context().catalog();

        let event = match command {
            Command::Empty => return Ok(()),
            Command::Show => return self.render_form(),
            Command::Help => return writeln!(self.output, "{}", HELP),
            Command::Unknown(text) => {
                return self.render_error(&format!("Unknown command '{}'. Type 'help'.", text))
            }
            Command::Company(arg) => {
                UserEvent::SelectCompany(resolve_option(&catalog.companies, &arg))
            }
            Command::Model(arg) => UserEvent::SelectModel(resolve_option(&form.models, &arg)),
            Command::Fuel(arg) => UserEvent::SelectFuel(resolve_option(&catalog.fuels, &arg)),
            Command::Year(arg) => match resolve_year(&catalog.years, &arg) {
                Some(year) => UserEvent::SelectYear(year),
                None => return self.render_error(&format!("'{}' is not a year", arg)),
            },
            Command::Kms(arg) => match arg.replace(',', "").parse::<i64>() {
                Ok(kms) => UserEvent::SetKmsDriven(kms),
                Err(_) => {
                    return self.render_error(&format!(
                        "Kilometres driven must be a whole number, got '{}'",
                        arg
                    ))
                }
            },
            Command::StepUp => UserEvent::StepKmsUp,
            Command::StepDown => UserEvent::StepKmsDown,
            Command::Theme => UserEvent::ToggleTheme,
            Command::Predict => UserEvent::Submit,
            Command::Quit => return Ok(()),
        };

        let refresh_form = matches!(event, UserEvent::SelectCompany(_) | UserEvent::ToggleTheme);
        match self.controller.handle(event) {
            Outcome::Updated if refresh_form => self.render_form(),
            Outcome::Updated => self.render_summary(),
            Outcome::Rejected(e) => self.render_error(&e.user_friendly_message()),
            Outcome::Estimated(estimate) => {
                let palette = self.palette();
                writeln!(
                    self.output,
                    "{}💰 Estimated Car Price: {}{}",
                    palette.success, estimate.formatted_price, palette.reset
                )?;
                writeln!(self.output, "{}{}{}", palette.muted, estimate.disclaimer, palette.reset)
            }
            Outcome::PredictionFailed(e) => {
                self.render_error(&format!("Prediction failed: {}", e.user_friendly_message()))?;
                let palette = self.palette();
                writeln!(
                    self.output,
                    "{}💡 {}{}",
                    palette.muted,
                    e.recovery_suggestion(),
                    palette.reset
                )
            }
        }
    }

    fn render_banner(&mut self) -> io::Result<()> {
        let palette = self.palette();
        writeln!(self.output, "{}{}{}", palette.heading, TITLE, palette.reset)?;
        writeln!(self.output, "{}", DESCRIPTION)?;
        writeln!(self.output, "{}", "-".repeat(60))?;
        writeln!(self.output, "Type 'help' for commands.")
    }

    fn render_form(&mut self) -> io::Result<()> {
        let palette = self.palette();
        let form = self.controller.form();
        let catalog = self.controller.context().catalog();
        let years: Vec<String> = catalog.years.iter().map(i32::to_string).collect();

        let sections: [(&str, &[String], Option<String>); 4] = [
            ("Select Company", catalog.companies.as_slice(), form.company.clone()),
            ("Select Car Model", form.models.as_slice(), form.model.clone()),
            ("Select Year of Purchase", years.as_slice(), form.year.map(|y| y.to_string())),
            ("Select Fuel Type", catalog.fuels.as_slice(), form.fuel_type.clone()),
        ];

        for (label, options, selected) in sections {
            writeln!(self.output, "{}{}{}", palette.label, label, palette.reset)?;
            if options.is_empty() {
                writeln!(self.output, "   {}(no options){}", palette.muted, palette.reset)?;
            }
            for (i, option) in options.iter().enumerate() {
                let marker = if selected.as_deref() == Some(option.as_str()) {
                    '*'
                } else {
                    ' '
                };
                writeln!(self.output, " {} {:>3}. {}", marker, i + 1, option)?;
            }
        }

        writeln!(
            self.output,
            "{}Enter Kilometres Driven{} (min 0, step {}): {}",
            palette.label,
            palette.reset,
            KMS_STEP,
            group_thousands(form.kms_driven)
        )?;
        writeln!(self.output, "{}", "-".repeat(60))
    }

    fn render_summary(&mut self) -> io::Result<()> {
        let form = self.controller.form();
        writeln!(
            self.output,
            "{} | {} | {} | {} | {} km",
            form.company.as_deref().unwrap_or("-"),
            form.model.as_deref().unwrap_or("-"),
            form.year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string()),
            form.fuel_type.as_deref().unwrap_or("-"),
            group_thousands(form.kms_driven)
        )
    }

    fn render_error(&mut self, message: &str) -> io::Result<()> {
        let palette = self.palette();
        writeln!(self.output, "{}❌ {}{}", palette.error, message, palette.reset)
    }
}
