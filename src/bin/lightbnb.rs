use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use lightbnb_db::config::{
    DEFAULT_DBNAME, DEFAULT_HOST, DEFAULT_PORT, ENV_DBNAME, ENV_HOST, ENV_PASSWORD, ENV_PORT,
    ENV_USER,
};
use lightbnb_db::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about = "Query the LightBnB store")]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct ConnectionArgs {
    #[arg(long, env = ENV_HOST, default_value = DEFAULT_HOST, global = true)]
    host: String,
    #[arg(long, env = ENV_PORT, default_value_t = DEFAULT_PORT, global = true)]
    port: u16,
    #[arg(long, env = ENV_USER, global = true)]
    user: Option<String>,
    #[arg(long, env = ENV_PASSWORD, default_value = "", hide_env_values = true, global = true)]
    password: String,
    #[arg(long, env = ENV_DBNAME, default_value = DEFAULT_DBNAME, global = true)]
    dbname: String,
}

impl ConnectionArgs {
    fn settings(&self) -> Result<DbSettings, LightbnbDbError> {
        let user = self.user.clone().ok_or_else(|| {
            LightbnbDbError::ConfigError(format!("--user or {ENV_USER} is required"))
        })?;
        Ok(DbSettings {
            host: self.host.clone(),
            port: self.port,
            user,
            password: self.password.clone(),
            dbname: self.dbname.clone(),
        })
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up one user by email or id
    User {
        #[arg(long, conflicts_with = "id", required_unless_present = "id")]
        email: Option<String>,
        #[arg(long)]
        id: Option<i64>,
    },
    /// Create a user
    AddUser {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// List a guest's reservations
    Reservations {
        #[arg(long)]
        guest_id: i64,
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: i64,
    },
    /// Search properties
    Properties {
        /// Matched as a substring once the first and last characters are removed
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        owner_id: Option<i64>,
        /// Dollars per night
        #[arg(long, value_parser = parse_finite)]
        min_price: Option<f64>,
        /// Dollars per night
        #[arg(long, value_parser = parse_finite)]
        max_price: Option<f64>,
        #[arg(long, value_parser = parse_finite)]
        min_rating: Option<f64>,
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: i64,
        /// Print the statement and parameters instead of running it
        #[arg(long)]
        explain: bool,
    },
    /// Create a property from column=value pairs, in order
    AddProperty {
        #[arg(long = "attr", value_name = "COLUMN=VALUE", value_parser = parse_attribute, required = true)]
        attrs: Vec<(String, RowValues)>,
    },
}

fn parse_finite(raw: &str) -> Result<f64, String> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err(format!("{raw:?} is not a finite number")),
        Err(err) => Err(err.to_string()),
    }
}

fn parse_attribute(raw: &str) -> Result<(String, RowValues), String> {
    let (column, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected COLUMN=VALUE, got {raw:?}"))?;
    Ok((column.trim().to_string(), parse_value(value)))
}

fn parse_value(raw: &str) -> RowValues {
    if let Ok(i) = raw.parse::<i64>() {
        RowValues::Int(i)
    } else if let Ok(f) = raw.parse::<f64>() {
        RowValues::Float(f)
    } else if let Ok(b) = raw.parse::<bool>() {
        RowValues::Bool(b)
    } else if raw.eq_ignore_ascii_case("null") {
        RowValues::Null
    } else {
        RowValues::Text(raw.to_string())
    }
}

#[derive(Serialize)]
struct Explain<'a> {
    query: &'a str,
    params: &'a [RowValues],
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Command::Properties {
        city,
        owner_id,
        min_price,
        max_price,
        min_rating,
        limit,
        explain: true,
    } = &cli.command
    {
        let search = PropertySearch {
            city: city.clone(),
            owner_id: *owner_id,
            minimum_price_per_night: *min_price,
            maximum_price_per_night: *max_price,
            minimum_rating: *min_rating,
        };
        let qp = build_property_search(&search, *limit)?;
        return print_json(&Explain {
            query: &qp.query,
            params: &qp.params,
        });
    }

    let store = Store::connect(&cli.connection.settings()?).await?;

    match cli.command {
        Command::User { email, id } => {
            let user = match (email, id) {
                (Some(email), _) => store.get_user_with_email(&email).await?,
                (None, Some(id)) => store.get_user_with_id(id).await?,
                (None, None) => None,
            };
            print_json(&user)
        }
        Command::AddUser {
            name,
            email,
            password,
        } => {
            let user = store.add_user(&NewUser::new(name, email, password)).await?;
            print_json(&user)
        }
        Command::Reservations { guest_id, limit } => {
            print_json(&store.get_all_reservations(guest_id, limit).await?)
        }
        Command::Properties {
            city,
            owner_id,
            min_price,
            max_price,
            min_rating,
            limit,
            ..
        } => {
            let search = PropertySearch {
                city,
                owner_id,
                minimum_price_per_night: min_price,
                maximum_price_per_night: max_price,
                minimum_rating: min_rating,
            };
            print_json(&store.get_all_properties(&search, limit).await?)
        }
        Command::AddProperty { attrs } => {
            let attrs: PropertyAttributes = attrs.into_iter().collect();
            print_json(&store.add_property(&attrs).await?)
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}
