//! Built-in demo schema and generated rows

use gridline_core::{Column, ColumnType, EnumOption, Fields, Result, Schema, Value};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

const COUNTRIES: [(&str, &str); 6] = [
    ("de", "Germany"),
    ("fi", "Finland"),
    ("se", "Sweden"),
    ("gb", "United Kingdom"),
    ("us", "United States"),
    ("es", "Spain"),
];

const FIRST_NAMES: [&str; 12] = [
    "Anna", "Ben", "Daniel", "Hanna", "Ivan", "Jo", "Lena", "Maria", "Oliver", "Sofia",
    "Stefan", "Tuula",
];

const LAST_NAMES: [&str; 8] = [
    "Andersson", "Brandt", "Hansen", "Korhonen", "Miller", "Novak", "Silva", "Weber",
];

const POSITIONS: [&str; 8] = [
    "Boss",
    "Contractor",
    "Designer",
    "Developer",
    "Manager",
    "Marketing",
    "Sales",
    "Support",
];

/// name, position, salary, country (enum) and active
pub fn demo_schema() -> Result<Schema> {
    let countries = COUNTRIES
        .iter()
        .map(|(code, name)| EnumOption::new(*code, *name))
        .collect();

    Schema::new(vec![
        Column::string("name").editable().required(),
        Column::string("position").editable(),
        Column::number("salary").editable(),
        Column::string("country").with_enum(countries).editable(),
        Column::boolean("active").editable(),
    ])
}

/// Generate `amount` rows for `schema` from a seeded RNG
///
/// Well-known properties get realistic values; any other column gets a
/// value of its type. The same seed always produces the same rows.
pub fn generate_rows(schema: &Schema, amount: usize, seed: u64) -> Vec<Fields> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..amount)
        .map(|_| {
            schema
                .iter()
                .map(|column| (column.property().to_string(), generate_value(column, &mut rng)))
                .collect()
        })
        .collect()
}

fn generate_value(column: &Column, rng: &mut StdRng) -> Value {
    if let Some(options) = column.enum_options() {
        return options
            .choose(rng)
            .map(|opt| opt.code.clone())
            .unwrap_or_default();
    }

    match (column.property(), column.column_type()) {
        ("name", _) => {
            let first = FIRST_NAMES.choose(rng).copied().unwrap_or_default();
            let last = LAST_NAMES.choose(rng).copied().unwrap_or_default();
            Value::from(format!("{first} {last}"))
        }
        ("position", _) => Value::from(POSITIONS.choose(rng).copied().unwrap_or_default()),
        ("salary", _) => Value::from(rng.gen_range(20..=120_i64) * 1000),
        (_, ColumnType::String) => Value::from(format!("{} {}", column.title(), rng.gen_range(1..=999))),
        (_, ColumnType::Number) => Value::from(rng.gen_range(0..=1000_i64)),
        (_, ColumnType::Boolean) => Value::from(rng.gen_bool(0.5)),
    }
}
