use crate::{
    normalize::{clean_price, clean_speed, extract_channels, first_number},
    rialcom::{TariffKind, TariffRecord},
    Extraction, Section, TariffExtractor,
};
use itertools::Itertools;
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use tracing::info;

/// Name, price, connection fee, speed.
const INTERNET_COLUMNS: usize = 4;

const E: &str = "Invalid selector";
lazy_static! {
    static ref SECTION: Selector = Selector::parse("div[id]").expect(E);
    static ref TABLE: Selector = Selector::parse("table").expect(E);
    static ref TR: Selector = Selector::parse("tr").expect(E);
    static ref TH: Selector = Selector::parse("th").expect(E);
    static ref TD: Selector = Selector::parse("td").expect(E);
}

fn find_section<'a>(doc: &'a Html, id: &str) -> Option<ElementRef<'a>> {
    doc.select(&SECTION).find(|el| el.value().id() == Some(id))
}

fn cell_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Plain internet plans: the first table of a section.
#[derive(Debug)]
pub struct InternetTariffs;

impl TariffExtractor for InternetTariffs {
    fn kind(&self) -> TariffKind {
        TariffKind::Internet
    }

    fn extract(&self, doc: &Html, section: &Section) -> Extraction {
        let Some(container) = find_section(doc, &section.id) else {
            return Extraction::SectionNotFound;
        };
        let Some(table) = container.select(&TABLE).next() else {
            return Extraction::TableNotFound;
        };

        let mut records = vec![];
        let mut skipped_rows = 0;
        for row in table.select(&TR).skip(1) {
            let cols = row.select(&TD).collect::<Vec<_>>();
            if cols.len() < INTERNET_COLUMNS {
                skipped_rows += 1;
                continue;
            }

            let record = TariffRecord {
                name: format!("{}{}", cell_text(cols[0]), section.suffix),
                channels: None,
                speed_mbps: clean_speed(&cell_text(cols[3])),
                price: clean_price(&cell_text(cols[1])),
            };
            info!("Added internet tariff: {}", record);
            records.push(record);
        }

        Extraction::Found {
            records,
            skipped_rows,
        }
    }
}

/// TV bundles: the second table of a section. Every column after the first
/// is a bundle option whose header names the internet speed, so each plan row
/// yields one record per option.
#[derive(Debug)]
pub struct TvTariffs;

impl TariffExtractor for TvTariffs {
    fn kind(&self) -> TariffKind {
        TariffKind::Tv
    }

    fn extract(&self, doc: &Html, section: &Section) -> Extraction {
        let Some(container) = find_section(doc, &section.id) else {
            return Extraction::SectionNotFound;
        };
        let tables = container.select(&TABLE).collect::<Vec<_>>();
        let Some(table) = tables.get(1) else {
            return Extraction::InsufficientTables {
                found: tables.len(),
            };
        };

        let headers = table
            .select(&TR)
            .next()
            .map(|tr| tr.select(&TH).skip(1).map(cell_text).collect::<Vec<_>>())
            .unwrap_or_default();
        info!("TV tariff headers: {}", headers.iter().join(", "));

        let mut records = vec![];
        let mut skipped_rows = 0;
        for row in table.select(&TR).skip(1) {
            let cols = row.select(&TD).collect::<Vec<_>>();
            if cols.len() < headers.len() + 1 {
                skipped_rows += 1;
                continue;
            }

            let base_name = cell_text(cols[0]);
            let channels = extract_channels(&base_name);
            // cells past the last header have no bundle to pair with
            for (header, col) in headers.iter().zip(&cols[1..]) {
                let record = TariffRecord {
                    name: format!("{} + {}{}", base_name, header, section.suffix),
                    channels,
                    speed_mbps: first_number(header).unwrap_or(0),
                    price: clean_price(&cell_text(*col)),
                };
                info!("Added TV tariff: {}", record);
                records.push(record);
            }
        }

        Extraction::Found {
            records,
            skipped_rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn section() -> Section {
        Section::new("collapse1", "_м")
    }

    fn found(extraction: Extraction) -> (Vec<TariffRecord>, usize) {
        match extraction {
            Extraction::Found {
                records,
                skipped_rows,
            } => (records, skipped_rows),
            other => panic!("expected records, got {other:?}"),
        }
    }

    const INTERNET_AND_TV: &str = r#"
        <div id="collapse1">
          <table>
            <tr><th>Тариф</th><th>Цена</th><th>Подключение</th><th>Скорость</th></tr>
            <tr><td>Старт</td><td>500 руб.</td><td>0</td><td>50000 Кбит/с</td></tr>
            <tr><td>Только имя</td><td>100</td></tr>
            <tr><td>Быстрый</td><td>—</td><td>0</td><td>нет данных</td><td>лишняя</td></tr>
          </table>
          <table>
            <tr><th>Пакет</th><th>Интернет 100</th><th>Интернет 200</th><th>Без интернета</th></tr>
            <tr><td>Базовый 120 каналов</td><td>700</td><td>800</td><td>400</td><td>сноска</td></tr>
            <tr><td>Кино</td><td>1 000 руб.</td><td>1 100 руб.</td><td>600 руб.</td></tr>
            <tr><td>Неполный</td><td>1</td><td>2</td></tr>
          </table>
        </div>
    "#;

    #[test]
    fn test_internet_rows() {
        let doc = Html::parse_document(INTERNET_AND_TV);
        let (records, skipped_rows) = found(InternetTariffs.extract(&doc, &section()));

        assert_eq!(
            records,
            vec![
                TariffRecord {
                    name: "Старт_м".to_string(),
                    channels: None,
                    speed_mbps: 50,
                    price: 500,
                },
                TariffRecord {
                    name: "Быстрый_м".to_string(),
                    channels: None,
                    speed_mbps: 0,
                    price: 0,
                },
            ]
        );
        assert_eq!(skipped_rows, 1);
    }

    #[test]
    fn test_tv_rows_cross_bundles() {
        let doc = Html::parse_document(INTERNET_AND_TV);
        let (records, skipped_rows) = found(TvTariffs.extract(&doc, &section()));

        assert_eq!(skipped_rows, 1);
        assert_eq!(records.len(), 2 * 3);

        let names = records.iter().map(|r| r.name.as_str()).collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                "Базовый 120 каналов + Интернет 100_м",
                "Базовый 120 каналов + Интернет 200_м",
                "Базовый 120 каналов + Без интернета_м",
                "Кино + Интернет 100_м",
                "Кино + Интернет 200_м",
                "Кино + Без интернета_м",
            ]
        );
        assert!(records[..3].iter().all(|r| r.channels == Some(120)));
        assert!(records[3..].iter().all(|r| r.channels.is_none()));

        let speeds = records.iter().map(|r| r.speed_mbps).collect::<Vec<_>>();
        assert_eq!(speeds, vec![100, 200, 0, 100, 200, 0]);
        let prices = records.iter().map(|r| r.price).collect::<Vec<_>>();
        assert_eq!(prices, vec![700, 800, 400, 1000, 1100, 600]);
    }

    #[test]
    fn test_missing_section() {
        let doc = Html::parse_document(INTERNET_AND_TV);
        let other = Section::new("collapse2", "_ч");

        assert_eq!(InternetTariffs.extract(&doc, &other), Extraction::SectionNotFound);
        assert_eq!(TvTariffs.extract(&doc, &other), Extraction::SectionNotFound);
    }

    #[test]
    fn test_section_id_must_be_on_div() {
        let doc = Html::parse_document(r#"<section id="collapse1"><table></table></section>"#);
        assert_eq!(InternetTariffs.extract(&doc, &section()), Extraction::SectionNotFound);
    }

    #[test]
    fn test_missing_tables() {
        let doc = Html::parse_document(r#"<div id="collapse1"><p>Скоро</p></div>"#);
        assert_eq!(InternetTariffs.extract(&doc, &section()), Extraction::TableNotFound);
        assert_eq!(
            TvTariffs.extract(&doc, &section()),
            Extraction::InsufficientTables { found: 0 }
        );
    }

    #[test]
    fn test_single_table_has_no_tv_tariffs() {
        let doc = Html::parse_document(
            r#"<div id="collapse1"><table>
                 <tr><th>Тариф</th><th>Цена</th><th>-</th><th>Скорость</th></tr>
                 <tr><td>Старт</td><td>500</td><td>0</td><td>50000</td></tr>
               </table></div>"#,
        );
        assert_eq!(
            TvTariffs.extract(&doc, &section()),
            Extraction::InsufficientTables { found: 1 }
        );
        assert_eq!(found(InternetTariffs.extract(&doc, &section())).0.len(), 1);
    }

    #[test]
    fn test_malformed_markup_is_tolerated() {
        let doc = Html::parse_document(r#"<div id="collapse1"><table><tr><td>Старт<td>500<td>0<td>"#);
        let (records, skipped_rows) = found(InternetTariffs.extract(&doc, &section()));
        assert!(records.is_empty());
        assert_eq!(skipped_rows, 0);
    }
}
