use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use pocketwise::{
    CategoryName, EntryKind, NewEntry, NewSavingsGoal, UserId, create_category, create_entry,
    create_savings_goal, initialize_db,
};

/// A utility for creating a test database for the REST API server of pocketwise.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The user ID to create records for.
    #[arg(long, short, default_value = "test-user")]
    user_id: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating categories...");
    let salary = create_category(CategoryName::new("Salary")?, &conn)?;
    let food = create_category(CategoryName::new("Food")?, &conn)?;
    let transport = create_category(CategoryName::new("Transport")?, &conn)?;
    let savings = create_category(CategoryName::new("Savings")?, &conn)?;

    let user_id = UserId::new(&args.user_id)?;
    let today = OffsetDateTime::now_utc().date();

    println!("Creating income and expenses for {user_id}...");
    for months_ago in 0..6 {
        let date = today - Duration::days(30 * months_ago);

        create_entry(
            EntryKind::Income,
            &user_id,
            NewEntry {
                amount: 3000.0,
                category_id: salary.id,
                date,
                description: "Pay".to_owned(),
            },
            &conn,
        )?;

        for (category_id, amount, description) in [
            (food.id, 120.0 + 10.0 * months_ago as f64, "Groceries"),
            (transport.id, 45.5, "Bus pass"),
        ] {
            create_entry(
                EntryKind::Expense,
                &user_id,
                NewEntry {
                    amount,
                    category_id,
                    date,
                    description: description.to_owned(),
                },
                &conn,
            )?;
        }
    }

    println!("Creating savings goal...");
    create_savings_goal(
        &user_id,
        NewSavingsGoal {
            goal_name: "Emergency fund".to_owned(),
            target_amount: 5000.0,
            current_amount: 1250.0,
            target_date: today + Duration::days(365),
            category_id: savings.id,
            description: "Three months of expenses".to_owned(),
            completed: false,
        },
        &conn,
    )?;

    println!("Success!");

    Ok(())
}
