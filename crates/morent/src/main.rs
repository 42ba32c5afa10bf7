//! `morent` - CLI for the car-rental marketplace core
//!
//! This binary stands in for the storefront: it reads the catalog, applies
//! the same filters and pagination the web pages use, and prints the result.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::Path;

use clap::Parser;
use tracing::debug;

use morent::booking::{Checkout, RentalSummary};
use morent::catalog::{
    capacity_counts, filter, paginate, type_counts, CarRecord, Catalog, PageSize,
};
use morent::chart::{layout_with, render_svg, Normalization};
use morent::cli::{
    CarCommand, CatalogCommand, ChartCommand, CheckoutCommand, Cli, Command, ConfigCommand,
    DashboardCommand, HomeCommand, OutputFormat, TripCommand,
};
use morent::dashboard::{
    group_thousands, recent_transactions, share_entries, total_rentals, TOP_RENTALS,
};
use morent::{init_logging, Config};

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() -> CliResult {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Catalog(cmd) => handle_catalog(&config, &cmd),
        Command::Home(cmd) => handle_home(&config, &cmd),
        Command::Car(cmd) => handle_car(&config, &cmd),
        Command::Chart(cmd) => handle_chart(&config, &cmd),
        Command::Dashboard(cmd) => handle_dashboard(&config, &cmd),
        Command::Trip(cmd) => handle_trip(&cmd),
        Command::Checkout(cmd) => handle_checkout(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn load_catalog(config: &Config) -> Result<Catalog, morent::Error> {
    Catalog::load(config.data_path())
}

fn handle_catalog(config: &Config, cmd: &CatalogCommand) -> CliResult {
    let catalog = load_catalog(config)?;
    let page_size = match cmd.page_size {
        Some(size) => PageSize::new(size)?,
        None => config.catalog_page_size()?,
    };
    let selection = cmd.selection(
        config.catalog.default_max_price,
        config.catalog.price_ceiling,
    )?;
    debug!(?selection, %page_size, show_all = cmd.all, "Browsing catalog");

    let matched = filter(catalog.cars(), &selection);
    let page = paginate(&matched, page_size, cmd.all);

    if cmd.format == OutputFormat::Json {
        let mut output = serde_json::json!({
            "total_count": page.total_count,
            "has_more": page.has_more,
            "cars": page.items,
        });
        if cmd.facets {
            output["types"] = serde_json::json!(type_counts(catalog.cars()));
            output["capacities"] = serde_json::json!(capacity_counts(catalog.cars()));
        }
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if cmd.facets {
        print_facets("Type", &type_counts(catalog.cars()));
        print_facets("Capacity", &capacity_counts(catalog.cars()));
        println!();
    }

    print_cars(page.items.iter().copied(), cmd.format);
    println!();
    println!(
        "Showing {} of {} cars (max ${:.2}/day)",
        page.items.len(),
        page.total_count,
        selection.max_price
    );
    if page.has_more {
        println!("{} more; use --all to show every match.", page.remaining());
    }
    Ok(())
}

fn handle_home(config: &Config, cmd: &HomeCommand) -> CliResult {
    let catalog = load_catalog(config)?;
    let popular = catalog.popular();
    let recommended = paginate(
        catalog.recommended(),
        config.recommendation_page_size()?,
        cmd.all,
    );

    if cmd.format == OutputFormat::Json {
        let output = serde_json::json!({
            "popular": popular,
            "recommended": {
                "total_count": recommended.total_count,
                "has_more": recommended.has_more,
                "cars": recommended.items,
            },
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Popular Car");
    println!("-----------");
    print_cars(popular, cmd.format);
    println!();
    println!("Recommendation Car");
    println!("------------------");
    print_cars(recommended.items, cmd.format);
    if recommended.has_more {
        println!();
        println!("{} more; use --all to show more cars.", recommended.remaining());
    }
    Ok(())
}

fn handle_car(config: &Config, cmd: &CarCommand) -> CliResult {
    let catalog = load_catalog(config)?;
    let car = catalog.find(cmd.id)?;
    let summary = RentalSummary::for_car(car, cmd.days)?;
    let reviews = paginate(catalog.reviews(), config.review_page_size()?, cmd.all_reviews);

    if cmd.format == OutputFormat::Json {
        let output = serde_json::json!({
            "car": car,
            "summary": summary,
            "reviews": {
                "total_count": reviews.total_count,
                "has_more": reviews.has_more,
                "items": reviews.items,
            },
            "recent": catalog.recent(),
            "recommended": catalog.detail_recommendations(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", car.name);
    println!("{}", "=".repeat(car.name.len()));
    println!("Type:          {}", car.car_type);
    println!("Capacity:      {}", car.capacity);
    println!("Steering:      {}", car.steering);
    println!("Fuel:          {}", car.fuel);
    match (car.original_price, car.discount_percent()) {
        (Some(original), Some(percent)) => println!(
            "Price:         ${:.2}/day (was ${original:.2}, {percent:.0}% off)",
            car.price
        ),
        _ => println!("Price:         ${:.2}/day", car.price),
    }
    println!();
    println!("[Rental Summary]");
    println!("  Days:        {}", summary.days);
    println!("  Subtotal:    ${:.2}", summary.subtotal);
    if summary.savings > 0.0 {
        println!("  Savings:     ${:.2}", summary.savings);
    }
    println!("  Tax:         ${:.2}", summary.tax);
    println!("  Total:       ${:.2}", summary.total);
    println!();
    match catalog.average_rating() {
        Some(avg) => println!("Reviews ({}, avg {avg:.1})", reviews.total_count),
        None => println!("Reviews (0)"),
    }
    for review in reviews.items {
        println!();
        println!("  {} - {}", review.name, review.role);
        println!("  {}  {}", review.display_date(), review.stars());
        println!("  {}", review.comment);
    }
    if reviews.has_more {
        println!();
        println!("  {} more; use --all-reviews to show all.", reviews.remaining());
    }
    println!();
    println!("Recent Car");
    println!("----------");
    print_cars(catalog.recent(), OutputFormat::Plain);
    println!();
    println!("Recommendation Car");
    println!("------------------");
    print_cars(catalog.detail_recommendations(), OutputFormat::Plain);
    Ok(())
}

fn handle_chart(config: &Config, cmd: &ChartCommand) -> CliResult {
    let mut style = config.donut_style();
    if let Some(radius) = cmd.radius {
        style.radius = radius;
    }
    if let Some(normalization) = cmd.normalization {
        style.normalization = Normalization::from(normalization);
    }
    let entries = share_entries(&TOP_RENTALS);

    let text = if cmd.svg {
        render_svg(
            &entries,
            &style,
            &group_thousands(total_rentals(&TOP_RENTALS)),
            "Rental Car",
        )?
    } else {
        let segments = layout_with(&entries, style.radius, style.normalization)?;
        match cmd.format {
            OutputFormat::Json => serde_json::to_string_pretty(&segments)? + "\n",
            OutputFormat::Plain | OutputFormat::Table => {
                let mut listing = format!(
                    "{:<12} {:>10} {:>10} {:>12} {:>12}\n",
                    "LABEL", "START", "SWEEP", "DASH", "OFFSET"
                );
                for s in &segments {
                    listing.push_str(&format!(
                        "{:<12} {:>10.2} {:>10.2} {:>12.2} {:>12.2}\n",
                        s.label, s.start_angle, s.sweep, s.dash_length, s.dash_offset
                    ));
                }
                listing
            }
        }
    };

    emit(cmd.output.as_deref(), &text)
}

fn handle_dashboard(config: &Config, cmd: &DashboardCommand) -> CliResult {
    let catalog = load_catalog(config)?;
    let recent = recent_transactions(&catalog)?;
    let total = total_rentals(&TOP_RENTALS);

    if cmd.format == OutputFormat::Json {
        let output = serde_json::json!({
            "total_rentals": total,
            "top_rentals": TOP_RENTALS,
            "recent_transactions": recent,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Top 5 Car Rental ({} rentals)", group_thousands(total));
    println!("----------------");
    for share in &TOP_RENTALS {
        println!(
            "  {:<12} {:>8}  {:>3.0}%",
            share.name,
            group_thousands(share.rentals),
            share.percentage
        );
    }
    println!();
    println!("Recent Transaction");
    println!("------------------");
    for tx in &recent {
        println!(
            "  {:<20} {:<10} {:<8} ${:.2}",
            tx.car.name, tx.car.car_type, tx.date, tx.price
        );
    }
    Ok(())
}

fn handle_trip(cmd: &TripCommand) -> CliResult {
    let trip = cmd.trip();

    if cmd.format == OutputFormat::Json {
        let output = serde_json::json!({
            "trip": trip,
            "complete": trip.is_complete(),
            "rental_days": trip.rental_days(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Pick-Up:   {}", trip.pickup);
    println!("Drop-Off:  {}", trip.dropoff);
    match trip.rental_days() {
        Some(days) => println!("Days:      {days}"),
        None => println!("Days:      -"),
    }
    if !trip.is_complete() {
        println!();
        println!("Trip is incomplete; set location, date and time for both legs.");
    }
    Ok(())
}

fn handle_checkout(config: &Config, cmd: &CheckoutCommand) -> CliResult {
    let catalog = load_catalog(config)?;
    let car = catalog.find(cmd.id)?;
    let checkout = Checkout::from_path(&cmd.form)?;
    let confirmation = checkout.confirm(car)?;

    if cmd.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&confirmation)?);
        return Ok(());
    }

    println!("Rental confirmed: {}", car.name);
    println!("  Pick-Up:   {}", confirmation.trip.pickup);
    println!("  Drop-Off:  {}", confirmation.trip.dropoff);
    println!("  Days:      {}", confirmation.summary.days);
    println!("  Payment:   {}", confirmation.payment_method);
    println!("  Total:     ${:.2}", confirmation.summary.total);
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> CliResult {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Catalog]");
                match config.data_path() {
                    Some(path) => println!("  Data path:          {}", path.display()),
                    None => println!("  Data path:          (built-in)"),
                }
                println!("  Page size:          {}", config.catalog.page_size);
                println!(
                    "  Recommendations:    {}",
                    config.catalog.recommendation_page_size
                );
                println!(
                    "  Default max price:  {}",
                    config.catalog.default_max_price
                );
                println!("  Price ceiling:      {}", config.catalog.price_ceiling);
                println!();
                println!("[Reviews]");
                println!("  Page size:          {}", config.reviews.page_size);
                println!();
                println!("[Chart]");
                println!("  Radius:             {}", config.chart.radius);
                println!("  Stroke width:       {}", config.chart.stroke_width);
                println!("  Normalization:      {}", config.chart.normalization);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

fn print_cars<'a>(cars: impl IntoIterator<Item = &'a CarRecord>, format: OutputFormat) {
    if format == OutputFormat::Table {
        println!(
            "{:>3}  {:<22} {:<10} {:<10} {:>8}  {:>8}",
            "ID", "NAME", "TYPE", "CAPACITY", "PRICE", "WAS"
        );
    }
    for car in cars {
        let was = car
            .original_price
            .map_or_else(String::new, |p| format!("${p:.2}"));
        if format == OutputFormat::Table {
            println!(
                "{:>3}  {:<22} {:<10} {:<10} {:>8}  {:>8}",
                car.id,
                car.name,
                car.car_type,
                car.capacity,
                format!("${:.2}", car.price),
                was
            );
        } else {
            println!(
                "{}. {} ({}, {}) ${:.2}/day {}",
                car.id, car.name, car.car_type, car.capacity, car.price, was
            );
        }
    }
}

fn print_facets(title: &str, counts: &[(String, usize)]) {
    let line = counts
        .iter()
        .map(|(label, n)| format!("{label} ({n})"))
        .collect::<Vec<_>>()
        .join(", ");
    println!("{title}: {line}");
}

fn emit(output: Option<&Path>, text: &str) -> CliResult {
    match output {
        Some(path) => {
            std::fs::write(path, text)?;
            debug!("Wrote {} bytes to {}", text.len(), path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}
