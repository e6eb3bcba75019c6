#![allow(missing_docs)]

use std::collections::HashSet;

use quickcheck::{QuickCheck, TestResult};
use structwalk::walk::{FieldPath, WalkOptions, resolve_path, walk, walk_with};
use structwalk_testkit::{ArbValue, expected_visits, record_walk};

fn check(prop: fn(ArbValue) -> TestResult) {
	QuickCheck::new().tests(500).max_tests(5000).quickcheck(prop);
}

#[test]
fn every_child_is_visited_exactly_once() {
	fn prop(value: ArbValue) -> TestResult {
		let events = record_walk(&value.0);
		let unique = events.iter().map(|event| event.path.clone()).collect::<HashSet<_>>();
		TestResult::from_bool(events.len() == expected_visits(&value.0) && unique.len() == events.len())
	}
	check(prop);
}

#[test]
fn parents_are_visited_before_descendants() {
	fn prop(value: ArbValue) -> TestResult {
		let events = record_walk(&value.0);
		let mut seen = HashSet::new();
		for event in &events {
			if event.path.len() > 1 && !seen.contains(&event.path[..event.path.len() - 1]) {
				return TestResult::failed();
			}
			seen.insert(event.path.clone());
		}
		TestResult::passed()
	}
	check(prop);
}

#[test]
fn path_is_one_shorter_than_branch() {
	fn prop(value: ArbValue) -> TestResult {
		TestResult::from_bool(record_walk(&value.0).iter().all(|event| event.path.len() + 1 == event.branch_len))
	}
	check(prop);
}

#[test]
fn repeated_walks_visit_the_same_paths() {
	fn prop(value: ArbValue) -> TestResult {
		let mut first = record_walk(&value.0).into_iter().map(|event| event.path).collect::<Vec<_>>();
		let mut second = record_walk(&value.0).into_iter().map(|event| event.path).collect::<Vec<_>>();
		first.sort();
		second.sort();
		TestResult::from_bool(first == second)
	}
	check(prop);
}

#[test]
fn visited_paths_resolve() {
	fn prop(value: ArbValue) -> TestResult {
		let mut paths = Vec::new();
		let stats = walk_with(&value.0, &WalkOptions::default(), |visit| paths.push(visit.to_path()));
		if stats.is_err() {
			return TestResult::failed();
		}
		TestResult::from_bool(paths.iter().all(|path: &FieldPath| resolve_path(&value.0, path).is_ok()))
	}
	check(prop);
}

#[test]
fn rendered_paths_parse_back_to_the_same_value() {
	fn prop(value: ArbValue) -> TestResult {
		let mut paths = Vec::new();
		walk(&value.0, |visit| paths.push(visit.to_path()));

		for path in paths {
			let Ok(reparsed) = FieldPath::parse(&path.to_string()) else {
				return TestResult::failed();
			};
			match (resolve_path(&value.0, &path), resolve_path(&value.0, &reparsed)) {
				(Ok(expected), Ok(found)) if std::ptr::from_ref(expected).cast::<()>() == std::ptr::from_ref(found).cast::<()>() => {}
				_ => return TestResult::failed(),
			}
		}
		TestResult::passed()
	}
	check(prop);
}
