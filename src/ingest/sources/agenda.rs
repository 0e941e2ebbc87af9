//! `senagenda` markup parser
//!
//! Committee markup carries agenda documents and, inside meeting bills,
//! committee vote records. Votes ride along as standalone bill updates so the
//! authoritative bill record picks them up through a merge.

use super::calendar::{attr_i32, attr_u32, bill_snapshot, parse_date};
use super::xml::{self, XmlElement};
use crate::ingest::traits::{AgendaParser, ParseError, ParseResult};
use crate::model::{Addendum, Agenda, Bill, Entity, Meeting, Vote, VoteKind};
use std::fs;
use std::path::Path;

pub struct AgendaMarkupParser;

impl AgendaParser for AgendaMarkupParser {
    fn parse_agenda(&self, path: &Path) -> ParseResult<Vec<Entity>> {
        let raw = fs::read_to_string(path)?;
        let root = xml::parse_document(&raw)?;
        if root.name != "SENATEDATA" {
            return Err(ParseError::Malformed(format!(
                "expected SENATEDATA root, found '{}'",
                root.name
            )));
        }

        let mut entities = Vec::new();
        let mut bill_updates = Vec::new();
        for el in root.children_named("senagenda") {
            let (agenda, updates) = agenda_from(el)?;
            entities.push(Entity::Agenda(agenda));
            bill_updates.extend(updates);
        }
        entities.extend(bill_updates.into_iter().map(Entity::Bill));
        Ok(entities)
    }
}

fn agenda_from(el: &XmlElement) -> ParseResult<(Agenda, Vec<Bill>)> {
    let mut agenda = Agenda::new(attr_u32(el, "no")?, attr_i32(el, "year")?);
    let mut updates = Vec::new();

    for addendum in el.children_named("addendum") {
        let mut meetings = Vec::new();
        for meeting in addendum.children_named("meeting") {
            meetings.push(meeting_from(meeting, &mut updates)?);
        }
        agenda.addendums.push(Addendum {
            id: addendum.attr("id").unwrap_or_default().to_string(),
            week_of: addendum.child_text("weekof").map(parse_date).transpose()?,
            meetings,
        });
    }
    Ok((agenda, updates))
}

fn meeting_from(el: &XmlElement, updates: &mut Vec<Bill>) -> ParseResult<Meeting> {
    let committee = el
        .attr("comm")
        .ok_or_else(|| ParseError::Malformed("meeting without a committee".to_string()))?;
    let mut meeting = Meeting {
        committee: committee.to_string(),
        chair: el.attr("chair").map(str::to_string),
        meeting_date: el.attr("meetdate").map(parse_date).transpose()?,
        location: el.attr("location").map(str::to_string),
        notes: el.child_text("notes").map(str::to_string),
        bills: Vec::new(),
    };

    for bill_el in el.children_named("bill") {
        let snapshot = bill_snapshot(bill_el)?;
        let votes = votes_from(bill_el)?;
        if !votes.is_empty() {
            // vote-only update for the authoritative record; the dispatcher
            // persists it with merge so existing fields survive
            let mut update = Bill::new(&snapshot.bill_no, snapshot.year);
            update.votes = votes;
            updates.push(update);
        }
        meeting.bills.push(snapshot);
    }
    Ok(meeting)
}

fn votes_from(el: &XmlElement) -> ParseResult<Vec<Vote>> {
    el.children_named("vote")
        .map(|vote_el| {
            let date = vote_el
                .attr("date")
                .ok_or_else(|| ParseError::Malformed("vote without a date".to_string()))?;
            let mut vote = Vote::new(parse_date(date)?, VoteKind::Committee);
            vote.ayes = roster(vote_el.attr("ayes"));
            vote.nays = roster(vote_el.attr("nays"));
            vote.abstains = roster(vote_el.attr("abstains"));
            vote.excused = roster(vote_el.attr("excused"));
            Ok(vote)
        })
        .collect()
}

fn roster(names: Option<&str>) -> Vec<String> {
    names
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect()
}
