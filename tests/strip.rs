use std::cell::RefCell;
use std::path::Path;

use symhide::{
    private_name, Error, ErrorKind, Options, Outcome, Result, Stripper, TokenSource, Toolchain,
    DEFAULT_TOKEN_LEN,
};

struct FakeToolchain {
    records: Vec<String>,
    deny: Vec<&'static str>,
    fail_listing: bool,
    renames: RefCell<Vec<(String, String)>>,
}

impl FakeToolchain {
    fn new(records: &[&str]) -> FakeToolchain {
        FakeToolchain {
            records: records.iter().map(|record| record.to_string()).collect(),
            deny: Vec::new(),
            fail_listing: false,
            renames: RefCell::new(Vec::new()),
        }
    }
}

impl Toolchain for FakeToolchain {
    fn list_defined_symbols(&self, _archive: &Path) -> Result<Vec<String>> {
        if self.fail_listing {
            return Err(Error::enumerate("nm exited with exit status: 1"));
        }
        Ok(self.records.clone())
    }

    fn redefine_symbol(&self, _archive: &Path, old: &str, new: &str) -> Result<bool> {
        self.renames
            .borrow_mut()
            .push((old.to_string(), new.to_string()));
        Ok(!self.deny.contains(&old))
    }
}

struct FixedTokens(&'static str);

impl TokenSource for FixedTokens {
    fn token(&mut self) -> String {
        self.0.to_string()
    }
}

fn options() -> Options {
    Options::new("libsafetynet.a", "nm", "objcopy")
}

#[test]
fn renames_unprefixed_symbols_only() {
    let toolchain = FakeToolchain::new(&[
        "libsafetynet.a[setup.o]:",
        "sn_init T 0000000000001129 26",
        "helper_fn T 0000000000001143 12",
        ".hidden t 0000000000000000 0",
        "__builtin_x T 0000000000002000 8",
        "libsafetynet.a[extra.o]:",
        "helper_fn T 0000000000000000 12",
    ]);
    let outcome = Stripper::with_parts(options(), &toolchain, FixedTokens("t0ken"))
        .run()
        .unwrap();
    // Member headers and toolchain artifacts are not symbols, and the
    // duplicate definition of helper_fn collapses to one rename.
    assert_eq!(
        outcome,
        Outcome {
            defined: 2,
            planned: 1,
        }
    );
    assert_eq!(
        *toolchain.renames.borrow(),
        [(
            "helper_fn".to_string(),
            private_name("sn_", "helper_fn", "t0ken"),
        )]
    );
}

#[test]
fn fully_prefixed_archive_is_an_error() {
    let toolchain = FakeToolchain::new(&["sn_init T 1129 26", "sn_teardown T 1150 30"]);
    let err = Stripper::with_parts(options(), &toolchain, FixedTokens("t0ken"))
        .run()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyPlan);
    assert!(err.to_string().contains("libsafetynet.a"));
    assert!(toolchain.renames.borrow().is_empty());
}

#[test]
fn failed_renames_are_tolerated() {
    let mut toolchain = FakeToolchain::new(&["gamma T 3 1", "alpha T 1 1", "beta T 2 1"]);
    toolchain.deny.push("beta");
    let outcome = Stripper::with_parts(options(), &toolchain, FixedTokens("t0ken"))
        .run()
        .unwrap();
    assert_eq!(outcome.planned, 3);
    // The failed attempt on beta does not stop the run, and attempts happen
    // in sorted order.
    let renames = toolchain.renames.borrow();
    let old: Vec<&str> = renames.iter().map(|(old, _)| old.as_str()).collect();
    assert_eq!(old, ["alpha", "beta", "gamma"]);
}

#[test]
fn listing_failure_is_fatal() {
    let mut toolchain = FakeToolchain::new(&["helper_fn T 1 1"]);
    toolchain.fail_listing = true;
    let err = Stripper::with_parts(options(), &toolchain, FixedTokens("t0ken"))
        .run()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Enumerate);
    assert!(toolchain.renames.borrow().is_empty());
}

#[test]
fn plan_membership_is_stable_across_runs() {
    let records = ["sn_init T 1 1", "helper_fn T 2 1", "zlib_inflate T 3 1"];
    let planned = |toolchain: &FakeToolchain| -> Vec<String> {
        toolchain
            .renames
            .borrow()
            .iter()
            .map(|(old, _)| old.clone())
            .collect()
    };

    let first = FakeToolchain::new(&records);
    Stripper::with_parts(options(), &first, FixedTokens("t0ken"))
        .run()
        .unwrap();
    let second = FakeToolchain::new(&records);
    Stripper::with_parts(options(), &second, FixedTokens("t0ken"))
        .run()
        .unwrap();
    assert_eq!(planned(&first), planned(&second));
}

#[test]
fn custom_prefix_is_honored() {
    let toolchain = FakeToolchain::new(&["my_keep T 1 1", "sn_init T 2 1"]);
    let mut options = options();
    options.keep_prefix = "my_".to_string();
    let outcome = Stripper::with_parts(options, &toolchain, FixedTokens("t0ken"))
        .run()
        .unwrap();
    assert_eq!(outcome.planned, 1);
    assert_eq!(toolchain.renames.borrow()[0].0, "sn_init");
}

#[test]
fn generated_names_follow_the_pattern() {
    let toolchain = FakeToolchain::new(&["helper_fn T 1 1", "zlib_inflate T 2 1"]);
    Stripper::with_parts(options(), &toolchain, symhide::RandomTokens::default())
        .run()
        .unwrap();
    for (old, new) in toolchain.renames.borrow().iter() {
        let head = format!("sn__internal_pri_{}_", old);
        assert!(new.starts_with(&head), "unexpected name: {}", new);
        assert!(new.ends_with("__"), "unexpected name: {}", new);
        let token = &new[head.len()..new.len() - 2];
        assert_eq!(token.len(), DEFAULT_TOKEN_LEN);
        assert!(token.chars().next().unwrap().is_ascii_alphabetic());
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
        // The generated name itself carries the keep-prefix, so a second
        // run leaves it alone.
        assert!(new.starts_with("sn_"));
    }
}
