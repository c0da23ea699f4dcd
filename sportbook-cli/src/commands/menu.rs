//! Interactive menu
//!
//! A blocking loop over the same repositories the HTTP API uses. Every
//! action opens its own connection; a failing action prints the error and
//! returns to the menu.
//!
//! ```text
//! $ sportbook menu
//!
//!  1) List users
//!  2) Add user
//!  ...
//!  0) Exit
//! ? Choice: 5
//! ? User id: 1
//! ```

use std::fmt;

use anyhow::{Context, Result};
use chrono::Local;
use inquire::{Confirm, CustomType, Password, Select, Text};

use sportbook_server::db::repos::{Facility, Reservation, User};
use sportbook_server::db::{FacilityRepo, ReservationRepo, UserRepo};
use sportbook_server::models::user::{check_password, check_username};
use sportbook_server::models::{
    Email, FacilityFilter, NewFacility, NewReservation, NewUser, ReservationFilter,
    ReservationSlot, ReservationStatus, Role, UserFilter,
};
use sportbook_server::Database;

/// One entry of the numbered menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ListUsers,
    AddUser,
    ListFacilities,
    AddFacility,
    CreateReservation,
    ListReservations,
    ChangeReservationStatus,
    DeleteUser,
    DeleteReservation,
    ChangePassword,
    ChangeAvailability,
    Exit,
}

impl MenuChoice {
    /// Display order; `Exit` is listed last but selected with 0.
    pub const ALL: [MenuChoice; 12] = [
        Self::ListUsers,
        Self::AddUser,
        Self::ListFacilities,
        Self::AddFacility,
        Self::CreateReservation,
        Self::ListReservations,
        Self::ChangeReservationStatus,
        Self::DeleteUser,
        Self::DeleteReservation,
        Self::ChangePassword,
        Self::ChangeAvailability,
        Self::Exit,
    ];

    pub fn number(self) -> u8 {
        match self {
            Self::ListUsers => 1,
            Self::AddUser => 2,
            Self::ListFacilities => 3,
            Self::AddFacility => 4,
            Self::CreateReservation => 5,
            Self::ListReservations => 6,
            Self::ChangeReservationStatus => 7,
            Self::DeleteUser => 8,
            Self::DeleteReservation => 9,
            Self::ChangePassword => 10,
            Self::ChangeAvailability => 11,
            Self::Exit => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ListUsers => "List users",
            Self::AddUser => "Add user",
            Self::ListFacilities => "List facilities",
            Self::AddFacility => "Add facility",
            Self::CreateReservation => "Create reservation",
            Self::ListReservations => "List reservations",
            Self::ChangeReservationStatus => "Change reservation status",
            Self::DeleteUser => "Delete user",
            Self::DeleteReservation => "Delete reservation",
            Self::ChangePassword => "Change user password",
            Self::ChangeAvailability => "Change facility availability",
            Self::Exit => "Exit",
        }
    }

    /// Parse the typed menu number. Anything else is `None`.
    pub fn parse(input: &str) -> Option<Self> {
        let number: u8 = input.trim().parse().ok()?;
        Self::ALL.into_iter().find(|choice| choice.number() == number)
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>2}) {}", self.number(), self.label())
    }
}

/// Run the menu until the user picks Exit or cancels the prompt
pub async fn run_menu(db: Database) -> Result<()> {
    println!("\nsportbook - database '{}'\n", db.name());

    loop {
        for choice in MenuChoice::ALL {
            println!("{choice}");
        }

        let input = match Text::new("Choice:").prompt() {
            Ok(input) => input,
            // Esc or Ctrl+C at the top level leaves the menu
            Err(_) => break,
        };

        let Some(choice) = MenuChoice::parse(&input) else {
            println!("Invalid choice '{}'\n", input.trim());
            continue;
        };
        if choice == MenuChoice::Exit {
            break;
        }

        if let Err(err) = dispatch(&db, choice).await {
            tracing::debug!(?choice, error = %err, "menu action failed");
            eprintln!("Error: {err:#}");
        }
        println!();
    }

    println!("Bye");
    Ok(())
}

async fn dispatch(db: &Database, choice: MenuChoice) -> Result<()> {
    match choice {
        MenuChoice::ListUsers => list_users(db).await,
        MenuChoice::AddUser => add_user(db).await,
        MenuChoice::ListFacilities => list_facilities(db).await,
        MenuChoice::AddFacility => add_facility(db).await,
        MenuChoice::CreateReservation => create_reservation(db).await,
        MenuChoice::ListReservations => list_reservations(db).await,
        MenuChoice::ChangeReservationStatus => change_status(db).await,
        MenuChoice::DeleteUser => delete_user(db).await,
        MenuChoice::DeleteReservation => delete_reservation(db).await,
        MenuChoice::ChangePassword => change_password(db).await,
        MenuChoice::ChangeAvailability => change_availability(db).await,
        MenuChoice::Exit => Ok(()),
    }
}

// ============================================================================
// Prompts
// ============================================================================

fn prompt_id(message: &str) -> Result<i32> {
    CustomType::<i32>::new(message)
        .with_error_message("Please type a whole number")
        .prompt()
        .context("Failed to read id")
}

fn prompt_text(message: &str) -> Result<String> {
    Text::new(message)
        .prompt()
        .with_context(|| format!("Failed to read '{}'", message.trim_end_matches(':')))
}

// ============================================================================
// Users
// ============================================================================

fn format_user(user: &User) -> String {
    format!(
        "{:>4}  {:<20} {:<30} {:<6} {}",
        user.id,
        user.username,
        user.email,
        user.role.as_str(),
        user.created_at.format("%Y-%m-%d %H:%M:%S")
    )
}

async fn list_users(db: &Database) -> Result<()> {
    let users = db
        .with_connection(|conn| {
            Box::pin(async move { UserRepo::new(conn).list(&UserFilter::default()).await })
        })
        .await?;

    if users.is_empty() {
        println!("No users");
    }
    for user in &users {
        println!("{}", format_user(user));
    }
    Ok(())
}

async fn add_user(db: &Database) -> Result<()> {
    let username = prompt_text("Username:")?;
    check_username(&username)?;
    let email = Email::new(&prompt_text("E-mail:")?)?;
    let password = Password::new("Password:")
        .without_confirmation()
        .prompt()
        .context("Failed to read password")?;
    check_password(&password)?;
    let role = Select::new("Role:", vec![Role::User, Role::Admin])
        .prompt()
        .context("Failed to read role")?;

    let user = NewUser {
        username: username.trim().to_owned(),
        email,
        password,
        role,
    };
    let id = db
        .with_connection(|conn| Box::pin(async move { UserRepo::new(conn).add(&user).await }))
        .await?;

    println!("User {id} created");
    Ok(())
}

async fn delete_user(db: &Database) -> Result<()> {
    let id = prompt_id("User id:")?;
    let confirmed = Confirm::new("Delete this user and all their reservations?")
        .with_default(false)
        .prompt()
        .context("Failed to read confirmation")?;
    if !confirmed {
        println!("Cancelled");
        return Ok(());
    }

    let removed = db
        .with_connection(|conn| Box::pin(async move { UserRepo::new(conn).delete(id).await }))
        .await?;

    if removed {
        println!("User {id} deleted");
    } else {
        println!("No user with id {id}");
    }
    Ok(())
}

async fn change_password(db: &Database) -> Result<()> {
    let id = prompt_id("User id:")?;
    let password = Password::new("New password:")
        .prompt()
        .context("Failed to read password")?;
    check_password(&password)?;

    db.with_connection(|conn| {
        Box::pin(async move { UserRepo::new(conn).update_password(id, &password).await })
    })
    .await?;

    println!("Password for user {id} changed");
    Ok(())
}

// ============================================================================
// Facilities
// ============================================================================

fn format_facility(facility: &Facility) -> String {
    format!(
        "{:>4}  {:<25} {:<20} {}",
        facility.id,
        facility.name,
        facility.location.as_deref().unwrap_or("-"),
        if facility.available {
            "available"
        } else {
            "unavailable"
        }
    )
}

async fn list_facilities(db: &Database) -> Result<()> {
    let facilities = db
        .with_connection(|conn| {
            Box::pin(async move { FacilityRepo::new(conn).list(&FacilityFilter::default()).await })
        })
        .await?;

    if facilities.is_empty() {
        println!("No facilities");
    }
    for facility in &facilities {
        println!("{}", format_facility(facility));
    }
    Ok(())
}

async fn add_facility(db: &Database) -> Result<()> {
    let name = prompt_text("Name:")?;
    let location = Text::new("Location:")
        .with_help_message("Leave empty if unknown")
        .prompt()
        .context("Failed to read location")?;
    let description = prompt_text("Description:")?;
    let available = Confirm::new("Available for booking?")
        .with_default(true)
        .prompt()
        .context("Failed to read availability")?;

    let location = Some(location.trim()).filter(|l| !l.is_empty());
    let facility = NewFacility::new(&name, location, &description, available)?;
    let id = db
        .with_connection(|conn| {
            Box::pin(async move { FacilityRepo::new(conn).add(&facility).await })
        })
        .await?;

    println!("Facility {id} created");
    Ok(())
}

async fn change_availability(db: &Database) -> Result<()> {
    let id = prompt_id("Facility id:")?;
    let available = Confirm::new("Available for booking?")
        .with_default(true)
        .prompt()
        .context("Failed to read availability")?;

    db.with_connection(|conn| {
        Box::pin(async move { FacilityRepo::new(conn).set_availability(id, available).await })
    })
    .await?;

    println!(
        "Facility {id} is now {}",
        if available { "available" } else { "unavailable" }
    );
    Ok(())
}

// ============================================================================
// Reservations
// ============================================================================

fn format_reservation(reservation: &Reservation) -> String {
    format!(
        "{:>4}  user {:<4} facility {:<4} {} {}-{}  {}",
        reservation.id,
        reservation.user_id,
        reservation.facility_id,
        reservation.date.format("%Y-%m-%d"),
        reservation.start_time.format("%H:%M"),
        reservation.end_time.format("%H:%M"),
        reservation.status
    )
}

async fn list_reservations(db: &Database) -> Result<()> {
    let reservations = db
        .with_connection(|conn| {
            Box::pin(async move {
                ReservationRepo::new(conn)
                    .list(&ReservationFilter::default())
                    .await
            })
        })
        .await?;

    if reservations.is_empty() {
        println!("No reservations");
    }
    for reservation in &reservations {
        println!("{}", format_reservation(reservation));
    }
    Ok(())
}

async fn create_reservation(db: &Database) -> Result<()> {
    let user_id = prompt_id("User id:")?;
    let facility_id = prompt_id("Facility id:")?;
    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
    let date = Text::new("Date (YYYY-MM-DD):")
        .with_default(&today)
        .prompt()
        .context("Failed to read date")?;
    let start_time = prompt_text("Start time (HH:MM):")?;
    let end_time = prompt_text("End time (HH:MM):")?;

    let reservation = NewReservation {
        user_id,
        facility_id,
        slot: ReservationSlot::compose(&date, &start_time, &end_time)?,
        status: ReservationStatus::Pending,
    };
    let id = db
        .with_connection(|conn| {
            Box::pin(async move { ReservationRepo::new(conn).add(&reservation).await })
        })
        .await?;

    println!("Reservation {id} created");
    Ok(())
}

async fn change_status(db: &Database) -> Result<()> {
    let id = prompt_id("Reservation id:")?;
    let status = Select::new("New status:", ReservationStatus::ALL.to_vec())
        .prompt()
        .context("Failed to read status")?;

    db.with_connection(|conn| {
        Box::pin(async move { ReservationRepo::new(conn).set_status(id, status).await })
    })
    .await?;

    println!("Reservation {id} is now {status}");
    Ok(())
}

async fn delete_reservation(db: &Database) -> Result<()> {
    let id = prompt_id("Reservation id:")?;
    let removed = db
        .with_connection(|conn| {
            Box::pin(async move { ReservationRepo::new(conn).delete(id).await })
        })
        .await?;

    if removed {
        println!("Reservation {id} deleted");
    } else {
        println!("No reservation with id {id}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn parses_every_menu_number() {
        for choice in MenuChoice::ALL {
            assert_eq!(MenuChoice::parse(&choice.number().to_string()), Some(choice));
        }
        assert_eq!(MenuChoice::parse(" 7 "), Some(MenuChoice::ChangeReservationStatus));
        assert_eq!(MenuChoice::parse("0"), Some(MenuChoice::Exit));
    }

    #[test]
    fn rejects_unknown_input() {
        assert_eq!(MenuChoice::parse("12"), None);
        assert_eq!(MenuChoice::parse("-1"), None);
        assert_eq!(MenuChoice::parse("list"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn menu_lines_are_numbered() {
        assert_eq!(MenuChoice::AddUser.to_string(), " 2) Add user");
        assert_eq!(
            MenuChoice::ChangeAvailability.to_string(),
            "11) Change facility availability"
        );
    }

    #[test]
    fn facility_line_marks_missing_location() {
        let line = format_facility(&Facility {
            id: 3,
            name: "Kurt 1".into(),
            location: None,
            description: String::new(),
            available: false,
        });
        assert!(line.contains(" - "));
        assert!(line.ends_with("unavailable"));
    }

    #[test]
    fn reservation_line_shows_slot_and_status() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let line = format_reservation(&Reservation {
            id: 1,
            user_id: 2,
            facility_id: 3,
            date,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            status: ReservationStatus::Confirmed,
            created_at: date.and_hms_opt(8, 0, 0).unwrap(),
        });
        assert!(line.contains("2025-07-01 09:00-10:30"));
        assert!(line.ends_with("confirmed"));
    }
}
