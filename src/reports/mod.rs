use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use gridfit::api::FitResult;
use gridfit::balancer::Pass;
use gridfit::evaluator::PotentialBreakdown;
use strum::IntoEnumIterator;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_numbers(table: &mut Table, from: usize) {
    for col in table.column_iter_mut().skip(from) {
        col.set_cell_alignment(CellAlignment::Right);
    }
}

fn transition(before: f64, after: f64) -> String {
    format!("{:.2} -> {:.2}", before, after)
}

pub fn print_fit_summary(results: &[FitResult]) {
    if results.is_empty() {
        println!("\nNo glyphs were fitted.");
        return;
    }

    let mut table = new_table();
    let mut header = vec![
        Cell::new("Glyph").add_attribute(Attribute::Bold),
        Cell::new("Points"),
        Cell::new("Moved"),
        Cell::new("Collision"),
        Cell::new("Ablation"),
        Cell::new("Fitness"),
    ];
    header.extend(Pass::iter().map(|p| Cell::new(p.to_string())));
    table.set_header(header);

    for r in results {
        let fitness = Cell::new(format!("{:.6} -> {:.6}", r.before.fitness, r.after.fitness));
        let fitness = if r.after.fitness > r.before.fitness {
            fitness.fg(Color::Green)
        } else if r.after.fitness < r.before.fitness {
            fitness.fg(Color::Red)
        } else {
            fitness
        };

        let mut row = vec![
            Cell::new(&r.glyph).add_attribute(Attribute::Bold),
            Cell::new(r.gene.len()),
            Cell::new(r.changed_points()),
            Cell::new(transition(
                r.before.collision.total(),
                r.after.collision.total(),
            )),
            Cell::new(transition(r.before.ablation.total(), r.after.ablation.total())),
            fitness,
        ];
        for pass in Pass::iter() {
            row.push(match r.report.outcome(pass) {
                Some(o) if pass == Pass::Symmetry => Cell::new(o.moves),
                Some(o) if o.converged => Cell::new(o.sweeps),
                Some(o) => Cell::new(format!("{}*", o.sweeps)).fg(Color::Yellow),
                None => Cell::new("-"),
            });
        }
        table.add_row(row);
    }
    align_numbers(&mut table, 1);

    println!("\n{}", table);
    println!("Pass columns show sweeps used (* = budget exhausted); symmetry shows rows copied.");
}

pub fn print_breakdowns(rows: &[(String, PotentialBreakdown)]) {
    if rows.is_empty() {
        println!("\nNo glyphs were scored.");
        return;
    }

    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Glyph").add_attribute(Attribute::Bold),
        Cell::new("Align"),
        Cell::new("Collide"),
        Cell::new("Diagonal"),
        Cell::new("Symmetry"),
        Cell::new("Swap"),
        Cell::new("Center"),
        Cell::new("Soft"),
        Cell::new("Distort"),
        Cell::new("Fitness").add_attribute(Attribute::Bold),
    ]);

    for (name, b) in rows {
        let (c, a) = (&b.collision, &b.ablation);
        table.add_row(vec![
            Cell::new(name).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.2}", c.alignment)),
            Cell::new(format!("{:.2}", c.collide)),
            Cell::new(format!("{:.2}", c.diagonal_break)),
            Cell::new(format!("{:.2}", c.symmetry_break)),
            Cell::new(format!("{:.2}", c.swap)),
            Cell::new(format!("{:.2}", a.center_deviation)),
            Cell::new(format!("{:.2}", a.soft_bound)),
            Cell::new(format!("{:.2}", a.triplet_distortion)),
            Cell::new(format!("{:.6}", b.fitness)).fg(Color::Cyan),
        ]);
    }
    align_numbers(&mut table, 1);

    println!("\n{}", table);
}
