//! Line-oriented front end.
//!
//! Plays the part of the original forms and sidebar menu: reads one command
//! per line, calls the auth and payment services, and prints the result.

use std::io::{BufRead, Lines, Write};

use anyhow::Context;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::auth::{services as auth_services, LoginRequest, RegisterOutcome, RegisterRequest};
use crate::payments::repo_types::DATE_FORMAT;
use crate::payments::{parse_amount, services as payment_services, PaymentOutcome, PaymentRequest};
use crate::state::AppState;

pub const APP_NAME: &str = "GreenWallet";

const GUEST_MENU: &str = "\
Menu:
  login
  register
  help | quit";

const MEMBER_MENU: &str = "\
Menu:
  dashboard
  pay <amount> <description>
  history
  logout
  help | quit";

/// Runs the shell until `quit` or end of input.
pub fn run<R, W>(state: &mut AppState, input: R, mut out: W) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "{APP_NAME}")?;
    writeln!(out, "{}", menu(state))?;
    let mut lines = input.lines();
    while let Some(line) = lines.next() {
        let line = line.context("read command")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit") {
            break;
        }
        dispatch(state, line, &mut lines, &mut out)?;
        out.flush()?;
    }
    Ok(())
}

fn menu(state: &AppState) -> &'static str {
    if state.session.is_logged_in() {
        MEMBER_MENU
    } else {
        GUEST_MENU
    }
}

fn dispatch<R, W>(
    state: &mut AppState,
    line: &str,
    lines: &mut Lines<R>,
    out: &mut W,
) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    debug!(command, logged_in = state.session.is_logged_in(), "dispatch");

    match (command, state.session.user_id().map(str::to_owned)) {
        ("help", _) => writeln!(out, "{}", menu(state))?,
        ("login", None) => login(state, lines, out)?,
        ("register", None) => register(state, lines, out)?,
        ("dashboard", Some(user_id)) => dashboard(state, &user_id, out)?,
        ("pay", Some(user_id)) => pay(state, &user_id, rest, out)?,
        ("history", Some(user_id)) => history(state, &user_id, out)?,
        ("logout", Some(_)) => {
            state.session.logout();
            writeln!(out, "Logged out successfully.")?;
        }
        _ => writeln!(out, "Unknown command `{command}`. Type `help` for the menu.")?,
    }
    Ok(())
}

/// Prints `label` and reads the next line verbatim. `None` at end of input.
fn prompt<R, W>(label: &str, lines: &mut Lines<R>, out: &mut W) -> anyhow::Result<Option<String>>
where
    R: BufRead,
    W: Write,
{
    write!(out, "{label}: ")?;
    out.flush()?;
    match lines.next() {
        Some(line) => {
            let mut field = line.context("read field")?;
            if field.ends_with('\r') {
                field.pop();
            }
            Ok(Some(field))
        }
        None => {
            writeln!(out)?;
            Ok(None)
        }
    }
}

fn login<R, W>(state: &mut AppState, lines: &mut Lines<R>, out: &mut W) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    let Some(username) = prompt("Username", lines, out)? else {
        return Ok(());
    };
    let Some(password) = prompt("Password", lines, out)? else {
        return Ok(());
    };
    let req = LoginRequest { username, password };
    match auth_services::login(&state.store, &req) {
        Some(user) => {
            state.session.login(user);
            writeln!(out, "Logged in successfully!")?;
        }
        None => writeln!(out, "Invalid username or password")?,
    }
    Ok(())
}

fn register<R, W>(state: &mut AppState, lines: &mut Lines<R>, out: &mut W) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut fields = Vec::with_capacity(4);
    for label in ["Username", "Email", "Password", "Confirm Password"] {
        let Some(field) = prompt(label, lines, out)? else {
            return Ok(());
        };
        fields.push(field);
    }
    let [username, email, password, confirm_password]: [String; 4] = fields
        .try_into()
        .map_err(|_| anyhow::anyhow!("registration form is incomplete"))?;
    let req = RegisterRequest {
        username,
        email,
        password,
        confirm_password,
    };
    let outcome = auth_services::register(&mut state.store, state.config.password_scheme, req)
        .context("register user")?;
    let message = match outcome {
        RegisterOutcome::Registered(_) => "Registration successful! Please log in.".to_owned(),
        RegisterOutcome::UsernameTaken => "Username already exists".to_owned(),
        RegisterOutcome::PasswordMismatch => "Passwords do not match".to_owned(),
        RegisterOutcome::InvalidEmail => "Invalid email".to_owned(),
        RegisterOutcome::MissingField(field) => format!("The {field} must not be empty"),
    };
    writeln!(out, "{message}")?;
    Ok(())
}

fn dashboard<W: Write>(state: &AppState, user_id: &str, out: &mut W) -> anyhow::Result<()> {
    let dash = payment_services::dashboard(&state.store, user_id);
    writeln!(out, "Welcome to {APP_NAME}, {user_id}!")?;
    writeln!(out, "Your personal finance dashboard")?;
    match dash.total {
        Some(total) => writeln!(out, "Total Payments: {}", format_money(total))?,
        None => writeln!(out, "Total Payments: too large to display")?,
    }
    if let Some(latest) = dash.latest {
        writeln!(
            out,
            "Latest Payment: {} ({})",
            format_money(latest.amount),
            latest.description
        )?;
    }
    Ok(())
}

fn pay<W: Write>(state: &mut AppState, user_id: &str, rest: &str, out: &mut W) -> anyhow::Result<()> {
    let (amount, description) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let Ok(amount) = parse_amount(amount) else {
        writeln!(out, "Usage: pay <amount> <description>")?;
        return Ok(());
    };
    let req = PaymentRequest {
        amount,
        description: description.to_owned(),
    };
    match payment_services::make_payment(&mut state.store, user_id, req).context("record payment")? {
        PaymentOutcome::Recorded(_) => writeln!(out, "Payment submitted successfully!")?,
        PaymentOutcome::AmountTooSmall { minimum } => {
            writeln!(out, "Amount must be at least {}", format_money(minimum))?
        }
        PaymentOutcome::TotalOverflow => {
            writeln!(out, "Amount is too large for your running total")?
        }
    }
    Ok(())
}

fn history<W: Write>(state: &AppState, user_id: &str, out: &mut W) -> anyhow::Result<()> {
    let payments = payment_services::history(&state.store, user_id);
    if payments.is_empty() {
        writeln!(out, "No payment history found.")?;
        return Ok(());
    }
    writeln!(out, "Payment History")?;
    for p in payments {
        let date = p.date.format(DATE_FORMAT).context("format payment date")?;
        writeln!(out, "{date}  {:>12}  {}", format_money(p.amount), p.description)?;
    }
    Ok(())
}

/// `$1,234.50` style, rounded half away from zero to cents.
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((&text, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{frac_part}")
}
