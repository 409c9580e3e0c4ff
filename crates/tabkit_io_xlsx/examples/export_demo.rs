//! Export two demo tables into one styled document under `data/output/`.

use tabkit_io_xlsx::{EnumCellValue, SpecTable, XlsxExporter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let table_people = SpecTable::new(
        vec!["Name".to_string(), "Age".to_string(), "City".to_string()],
        vec![
            vec![
                EnumCellValue::String("Alice".to_string()),
                EnumCellValue::Number(25.0),
                EnumCellValue::String("New York".to_string()),
            ],
            vec![
                EnumCellValue::String("Bob".to_string()),
                EnumCellValue::Number(30.0),
                EnumCellValue::String("London".to_string()),
            ],
            vec![
                EnumCellValue::String("Charlie".to_string()),
                EnumCellValue::Number(35.0),
                EnumCellValue::String("Paris".to_string()),
            ],
        ],
    )?;

    let table_products = SpecTable::new(
        vec![
            "Product".to_string(),
            "number_decimal".to_string(),
            "number_no_decimal".to_string(),
        ],
        vec![
            vec![
                EnumCellValue::String("Laptop".to_string()),
                EnumCellValue::Number(9909.0),
                EnumCellValue::Number(15430.0),
            ],
            vec![
                EnumCellValue::String("Phone".to_string()),
                EnumCellValue::Number(0.699),
                EnumCellValue::Number(25.0),
            ],
            vec![
                EnumCellValue::String("Tablet".to_string()),
                EnumCellValue::Number(1.399),
                EnumCellValue::Number(15.0),
            ],
        ],
    )?;

    let l_sheet_names = vec!["People".to_string(), "Products".to_string()];
    let mut exporter = XlsxExporter::new("data/output")?;
    let path = exporter.export_tables(
        "demo_output.xlsx",
        &[table_people, table_products],
        Some(&l_sheet_names),
    )?;
    println!("exported to {}", path.display());

    Ok(())
}
