use afrigrid::{Afrigrid, FetchPlan, Period, Selection};
use chrono::NaiveDate;

fn main() -> Result<(), afrigrid::AfrigridError> {
    let portal = Afrigrid::new();
    let gazetteer = portal.gazetteer();

    println!(
        "Nigeria is divided into {}s: {:?}",
        gazetteer.division_type("Nigeria"),
        gazetteer.divisions("Nigeria")
    );

    let selection = Selection::default()
        .sub_divisions("Nigeria", "Lagos", ["Ikeja", "Epe", "Badagry"]);
    let locations = portal.resolve(&selection);
    for location in &locations {
        println!("{}: ({}, {})", location.name, location.latitude, location.longitude);
    }

    let report = portal.validate(&locations);
    println!("within African bounds: {}", report.ok);

    let period = Period::new(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
    )?;
    let plan = FetchPlan::new(&locations, period);
    println!(
        "fetch plan: {} locations over {} days",
        plan.len(),
        plan.period.days()
    );

    Ok(())
}
