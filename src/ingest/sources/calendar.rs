//! `sencalendar` markup parser

use super::xml::{self, XmlElement};
use crate::ingest::traits::{CalendarParser, ParseError, ParseResult};
use crate::model::{Bill, Calendar, CalendarEntry, Section, Sequence, Supplemental};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

pub struct CalendarMarkupParser;

impl CalendarParser for CalendarMarkupParser {
    fn parse_calendar(&self, path: &Path) -> ParseResult<Vec<Calendar>> {
        let raw = fs::read_to_string(path)?;
        let root = xml::parse_document(&raw)?;
        if root.name != "SENATEDATA" {
            return Err(ParseError::Malformed(format!(
                "expected SENATEDATA root, found '{}'",
                root.name
            )));
        }
        root.children_named("sencalendar")
            .map(calendar_from)
            .collect()
    }
}

fn calendar_from(el: &XmlElement) -> ParseResult<Calendar> {
    let mut calendar = Calendar::new(attr_u32(el, "no")?, attr_i32(el, "year")?);
    if let Some(sessyr) = el.attr("sessyr") {
        calendar.session_year = sessyr
            .parse()
            .map_err(|_| ParseError::Malformed(format!("bad sessyr '{}'", sessyr)))?;
    }
    for sup in el.children_named("supplemental") {
        calendar.supplementals.push(supplemental_from(sup)?);
    }
    Ok(calendar)
}

fn supplemental_from(el: &XmlElement) -> ParseResult<Supplemental> {
    let mut supplemental = Supplemental {
        id: el.attr("id").unwrap_or_default().to_string(),
        calendar_date: el.child_text("caldate").map(parse_date).transpose()?,
        sections: Vec::new(),
        sequence: None,
    };
    for section in el.children_named("section") {
        let name = section
            .attr("name")
            .ok_or_else(|| ParseError::Malformed("section without a name".to_string()))?;
        supplemental.sections.push(Section {
            name: name.to_string(),
            entries: entries_from(section)?,
        });
    }
    if let Some(sequence) = el.child("sequence") {
        supplemental.sequence = Some(Sequence {
            no: attr_u32(sequence, "no")?,
            entries: entries_from(sequence)?,
        });
    }
    Ok(supplemental)
}

fn entries_from(el: &XmlElement) -> ParseResult<Vec<CalendarEntry>> {
    el.children_named("calno").map(entry_from).collect()
}

fn entry_from(el: &XmlElement) -> ParseResult<CalendarEntry> {
    Ok(CalendarEntry {
        no: el
            .attr("no")
            .map(|no| {
                no.parse()
                    .map_err(|_| ParseError::Malformed(format!("bad calno '{}'", no)))
            })
            .transpose()?,
        bill: el.child("bill").map(bill_snapshot).transpose()?,
        sub_bill_no: el.attr("subbill").map(str::to_string),
        motion: el.attr("motion").map(str::to_string),
    })
}

/// The embedded snapshot of a referenced bill, as of parse time.
pub(super) fn bill_snapshot(el: &XmlElement) -> ParseResult<Bill> {
    let bill_no = el
        .attr("no")
        .ok_or_else(|| ParseError::Malformed("bill element without a number".to_string()))?;
    let mut bill = Bill::new(bill_no, attr_i32(el, "year")?);
    bill.title = el.child_text("title").map(str::to_string);
    bill.sponsor = el.child_text("sponsor").map(str::to_string);
    bill.status = el.child_text("status").map(str::to_string);
    Ok(bill)
}

pub(super) fn parse_date(text: &str) -> ParseResult<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| ParseError::Malformed(format!("bad date '{}'", text)))
}

pub(super) fn attr_u32(el: &XmlElement, name: &str) -> ParseResult<u32> {
    attr_required(el, name)?
        .parse()
        .map_err(|_| ParseError::Malformed(format!("bad {} '{}'", name, el.attr(name).unwrap_or(""))))
}

pub(super) fn attr_i32(el: &XmlElement, name: &str) -> ParseResult<i32> {
    attr_required(el, name)?
        .parse()
        .map_err(|_| ParseError::Malformed(format!("bad {} '{}'", name, el.attr(name).unwrap_or(""))))
}

fn attr_required<'a>(el: &'a XmlElement, name: &str) -> ParseResult<&'a str> {
    el.attr(name).ok_or_else(|| {
        ParseError::Malformed(format!("{} element missing '{}' attribute", el.name, name))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKUP: &str = r#"<SENATEDATA>
<sencalendar no="5" year="2020" sessyr="2020">
  <supplemental id="A">
    <caldate>2020-01-08</caldate>
    <section name="BILLS ON THIRD READING">
      <calno no="101">
        <bill no="S100" year="2020">
          <sponsor>SMITH</sponsor>
          <title>An act</title>
          <status>IN_SENATE_COMM</status>
        </bill>
      </calno>
    </section>
    <sequence no="1">
      <calno no="102" motion="RESTORE">
        <bill no="S200" year="2020"/>
      </calno>
    </sequence>
  </supplemental>
</sencalendar>
</SENATEDATA>"#;

    fn parse(markup: &str) -> ParseResult<Vec<Calendar>> {
        let root = xml::parse_document(markup)?;
        root.children_named("sencalendar")
            .map(calendar_from)
            .collect()
    }

    #[test]
    fn parses_supplementals_sections_and_sequence() {
        let calendars = parse(MARKUP).unwrap();
        assert_eq!(calendars.len(), 1);
        let calendar = &calendars[0];
        assert_eq!(calendar.calendar_no, 5);

        let supplemental = &calendar.supplementals[0];
        assert_eq!(supplemental.id, "A");
        assert_eq!(
            supplemental.calendar_date,
            NaiveDate::from_ymd_opt(2020, 1, 8)
        );

        let entry = &supplemental.sections[0].entries[0];
        let bill = entry.bill.as_ref().unwrap();
        assert_eq!(bill.bill_no, "S100");
        assert_eq!(bill.status.as_deref(), Some("IN_SENATE_COMM"));

        let sequence = supplemental.sequence.as_ref().unwrap();
        assert_eq!(sequence.entries[0].motion.as_deref(), Some("RESTORE"));
    }

    #[test]
    fn missing_calendar_number_is_malformed() {
        let err = parse("<SENATEDATA><sencalendar year=\"2020\"/></SENATEDATA>").unwrap_err();
        assert!(matches!(err, ParseError::Malformed(_)));
    }
}
