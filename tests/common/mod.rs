//! Common test utilities: a recording index double and delivery fixtures

use legisync::index::IndexResult;
use legisync::{IndexDocument, SearchIndex};
use std::sync::Mutex;

/// Search index double that records every submission.
#[derive(Default)]
pub struct RecordingIndex {
    pub submitted: Mutex<Vec<IndexDocument>>,
}

impl RecordingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn submitted_keys(&self) -> Vec<String> {
        self.submitted
            .lock()
            .unwrap()
            .iter()
            .map(|d| d.key.clone())
            .collect()
    }
}

impl SearchIndex for RecordingIndex {
    fn submit(&self, documents: &[IndexDocument]) -> IndexResult<()> {
        self.submitted.lock().unwrap().extend_from_slice(documents);
        Ok(())
    }
}

#[allow(dead_code)]
pub const BILL_BATCH: &str = "\
BILL S100 2020
TITLE An act to amend the highway law
SPONSOR SMITH
STATUS IN_SENATE_COMM
VOTE 2020-03-01 FLOOR AYES=SMITH,JONES NAYS=DOE
TEXT T00001:   1  SECTION 1.
TEXT T00002:   2  THIS ACT SHALL TAKE EFFECT
END
";

#[allow(dead_code)]
pub const CALENDAR_MARKUP: &str = r#"<SENATEDATA>
<sencalendar no="5" year="2020" sessyr="2020">
  <supplemental id="A">
    <caldate>2020-01-08</caldate>
    <section name="BILLS ON THIRD READING">
      <calno no="101">
        <bill no="S100" year="2020">
          <title>Roads & Bridges</title>
          <status>IN_SENATE_COMM</status>
        </bill>
      </calno>
    </section>
  </supplemental>
</sencalendar>
</SENATEDATA>
"#;

#[allow(dead_code)]
pub const AGENDA_MARKUP: &str = r#"<SENATEDATA>
<senagenda no="3" year="2020">
  <addendum id="">
    <weekof>2020-01-06</weekof>
    <meeting comm="TRANSPORTATION" chair="SMITH" meetdate="2020-01-08">
      <bill no="S100" year="2020">
        <title>An act to amend the highway law</title>
        <vote date="2020-01-08" ayes="SMITH,JONES" nays=""/>
      </bill>
    </meeting>
  </addendum>
</senagenda>
</SENATEDATA>
"#;

#[allow(dead_code)]
pub const TRANSCRIPT: &str = "\
    1  NEW YORK STATE SENATE
    2  THE STENOGRAPHIC RECORD
    3  ALBANY, NEW YORK
    4  January 8, 2020
    5  REGULAR SESSION
    6  THE PRESIDENT: The Senate will come to order.
";
