use std::fmt::Display;
use std::io::Write;
use std::rc::Rc;

use anyhow::{Context, Result};
use log::info;

use crate::appliance::{Appliance, ApplianceKind, LogPlugListener, NoopPlugListener, PlugListener};
use crate::applianceset::ApplianceSet;
use crate::args::Args;

fn list<T: Display>(items: &[T]) -> String {
    let items: Vec<String> = items.iter().map(|item| item.to_string()).collect();
    format!("[{}]", items.join(", "))
}

fn print_all<W: Write, T: Display>(out: &mut W, items: &[T]) -> Result<()> {
    for item in items {
        writeln!(out, "{}", item)?;
    }
    Ok(())
}

/// Walks through every set operation on a handful of appliances, printing
/// the set after each step.
pub fn run_demo<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    let mut rng = args.rng();
    let mut listener: Box<dyn PlugListener> = if args.quiet_plugs {
        Box::new(NoopPlugListener {})
    } else {
        Box::new(LogPlugListener {})
    };

    let mut stove = Appliance::random(ApplianceKind::ElectricStove, "Bosch", &mut rng)
        .context("unable to build stove")?;
    let hairdryer = Appliance::random(ApplianceKind::Hairdryer, "Samsung", &mut rng)?;
    let microwave = Appliance::random(ApplianceKind::Microwave, "LG", &mut rng)?;
    let vacuum_cleaner = Appliance::random(ApplianceKind::VacuumCleaner, "Philips", &mut rng)?;
    let washing_machine =
        Appliance::random(ApplianceKind::WashingMachine, "Panasonic", &mut rng)?;

    stove.plug_in(&mut *listener);
    info!(
        "{} draws {:.1} W and emits {:.1} µT",
        stove,
        stove.power(),
        stove.electromagnetic_emission()
    );
    stove.unplug(&mut *listener);

    let stove = Rc::new(stove);
    let hairdryer = Rc::new(hairdryer);
    let microwave = Rc::new(microwave);
    let vacuum_cleaner = Rc::new(vacuum_cleaner);
    let washing_machine = Rc::new(washing_machine);

    writeln!(out, "\n=== ApplianceSet constructors ===")?;

    let empty_set: ApplianceSet<Rc<Appliance>> = ApplianceSet::new();
    writeln!(out, "Empty set: {}", empty_set)?;

    let mut single_set = ApplianceSet::with_item(Rc::clone(&stove));
    writeln!(out, "Single set: {}", single_set)?;

    let mut appliances = vec![Rc::clone(&hairdryer), Rc::clone(&washing_machine)];
    let mut collection_set = ApplianceSet::from_items(appliances.iter().cloned());
    writeln!(out, "Collection set: {}", collection_set)?;

    writeln!(out, "\n=== ApplianceSet methods ===")?;

    writeln!(out, "\nAdding vacuum cleaner to collection set...")?;
    collection_set.add(Rc::clone(&vacuum_cleaner));
    writeln!(out, "Collection set after adding new element: {}", collection_set)?;

    writeln!(out, "\nAdding same washing machine to collection set...")?;
    collection_set.add(Rc::clone(&washing_machine));
    writeln!(out, "Collection set after adding same element: {}", collection_set)?;

    writeln!(out, "\nAdding list of electrical appliances to collection set...")?;
    appliances.push(Rc::clone(&microwave));
    appliances.push(Rc::clone(&stove));
    collection_set.add_all(appliances.iter().cloned());
    writeln!(out, "List of electrical appliances:\n{}", list(&appliances))?;
    writeln!(
        out,
        "Collection set after adding list of new elements: {}",
        collection_set
    )?;

    writeln!(
        out,
        "\nDoes collection set contain hairdryer? {}",
        collection_set.contains(&hairdryer)
    )?;

    writeln!(out, "\nList of electrical appliances:\n{}", list(&appliances))?;
    writeln!(
        out,
        "Does collection set contain all electrical appliances from list? {}",
        collection_set.contains_all(&appliances)
    )?;

    writeln!(out, "\nRemoving hairdryer from collection set...")?;
    collection_set.remove(&hairdryer);
    writeln!(out, "Collection set after removing element: {}", collection_set)?;

    writeln!(out, "\nSize of collection set: {}", collection_set.len())?;

    writeln!(out, "\nConverting collection set to arrays...")?;
    let first = collection_set.to_buffer(Vec::new());
    writeln!(out, "\nFirst array elements: ")?;
    for appliance in first.iter().flatten() {
        writeln!(out, "{}", appliance)?;
    }
    let second = collection_set.to_vec();
    writeln!(out, "\nSecond array elements: ")?;
    print_all(out, &second)?;

    writeln!(out, "\nCollection set elements: ")?;
    for appliance in &collection_set {
        writeln!(out, "{}", appliance)?;
    }

    writeln!(out, "\nRemoving some elements from collection set...")?;
    appliances.retain(|appliance| *appliance != stove);
    collection_set.remove_all(&appliances);
    writeln!(
        out,
        "\nList of electrical appliances to remove:\n{}",
        list(&appliances)
    )?;
    writeln!(out, "Collection set after removing elements: {}", collection_set)?;
    writeln!(out, "\nIs collection set empty? {}", collection_set.is_empty())?;

    writeln!(out, "\nRetaining some elements from collection set...")?;
    collection_set.retain_all(&appliances);
    writeln!(
        out,
        "\nList of electrical appliances used to retain:\n{}",
        list(&appliances)
    )?;
    writeln!(out, "Collection set after retaining elements: {}", collection_set)?;
    writeln!(out, "\nIs collection set empty? {}", collection_set.is_empty())?;

    writeln!(out, "\nClearing single set...")?;
    single_set.clear();
    writeln!(out, "Single set after clearing: {}", single_set)?;

    Ok(())
}
