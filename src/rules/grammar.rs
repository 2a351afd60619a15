//! Grammar and spelling through an external engine.
//!
//! The whole catalog is sent in one request: the normalized translations,
//! quoted spans masked, joined by blank lines. The engine numbers paragraphs
//! so that entry `n` is paragraph `2n`.

use std::{
    io::{self, Read, Write},
    path::Path,
    process::{Child, Command, Stdio},
    sync::{Arc, OnceLock},
    thread,
    time::{Duration, Instant},
};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    config::GrammarConfig,
    core::{
        catalog::{Catalog, Entry},
        dictionary::PersonalDictionary,
        error::{CheckError, EngineError},
        glossary::Glossary,
        markup::{PLACEHOLDER, mask_quoted},
    },
    rules::Checker,
    utils::char_slice,
};

pub const NAME: &str = "Grammalecte";

const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Characters of context kept before and after a reported span.
const CONTEXT_BEFORE: usize = 40;
const CONTEXT_AFTER: usize = 10;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

// ============================================================
// Engine
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingCategory {
    Grammar,
    Spelling,
}

/// One problem reported by the engine.
///
/// `start` and `end` are character offsets within the paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineFinding {
    pub category: FindingCategory,
    /// Rule identifier for grammar findings, offending word for spelling ones.
    pub rule_or_word: String,
    /// Empty for spelling findings.
    pub message: String,
    pub start: usize,
    pub end: usize,
    pub paragraph: usize,
}

impl EngineFinding {
    pub fn grammar(
        paragraph: usize,
        start: usize,
        end: usize,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category: FindingCategory::Grammar,
            rule_or_word: rule.into(),
            message: message.into(),
            start,
            end,
            paragraph,
        }
    }

    pub fn spelling(paragraph: usize, start: usize, end: usize, word: impl Into<String>) -> Self {
        Self {
            category: FindingCategory::Spelling,
            rule_or_word: word.into(),
            message: String::new(),
            start,
            end,
            paragraph,
        }
    }
}

/// A grammar and spelling analyzer for French text.
pub trait GrammarEngine: Send + Sync {
    fn name(&self) -> &str;

    /// Analyze a text made of paragraphs separated by blank lines.
    fn analyze(&self, text: &str) -> Result<Vec<EngineFinding>, EngineError>;

    /// Try to make the engine available after [`EngineError::Unavailable`].
    fn provision(&self) -> Result<(), EngineError> {
        Err(EngineError::Unavailable {
            program: self.name().to_string(),
            reason: "no way to install it".to_string(),
        })
    }
}

/// Grammalecte, run as a command-line program on a temporary file.
#[derive(Debug, Clone)]
pub struct GrammalecteCli {
    pub program: String,
    /// Arguments following `-f <file>`.
    pub args: Vec<String>,
    pub timeout: Duration,
    pub install_command: Vec<String>,
}

impl GrammalecteCli {
    pub fn from_config(config: &GrammarConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            install_command: config.install_command.clone(),
        }
    }

    fn spawn(&self, input: &Path) -> Result<Child, EngineError> {
        Command::new(&self.program)
            .arg("-f")
            .arg(input)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                    EngineError::Unavailable {
                        program: self.program.clone(),
                        reason: e.to_string(),
                    }
                }
                _ => EngineError::Io(e),
            })
    }

    /// Wait for the child, killing it past the timeout. Pipes are drained on
    /// separate threads so a chatty engine cannot block on a full pipe.
    fn wait_output(&self, mut child: Child) -> Result<(String, String), EngineError> {
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(EngineError::Timeout {
                    secs: self.timeout.as_secs(),
                });
            }
            thread::sleep(POLL_INTERVAL);
        };

        let join = |handle: thread::JoinHandle<io::Result<String>>| {
            handle
                .join()
                .map_err(|_| EngineError::Protocol("output reader panicked".to_string()))?
                .map_err(EngineError::Io)
        };
        let stdout = join(stdout)?;
        let stderr = join(stderr)?;

        if !status.success() {
            return Err(EngineError::Protocol(format!(
                "`{}` exited with {}: {}",
                self.program,
                status,
                stderr.trim()
            )));
        }
        Ok((stdout, stderr))
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<io::Result<String>> {
    thread::spawn(move || {
        let mut buffer = String::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_string(&mut buffer)?;
        }
        Ok(buffer)
    })
}

impl GrammarEngine for GrammalecteCli {
    fn name(&self) -> &str {
        &self.program
    }

    fn analyze(&self, text: &str) -> Result<Vec<EngineFinding>, EngineError> {
        let mut input = tempfile::Builder::new()
            .prefix("polint_")
            .suffix(".txt")
            .tempfile()?;
        input.write_all(text.as_bytes())?;
        input.flush()?;

        let child = self.spawn(input.path())?;
        let (stdout, stderr) = self.wait_output(child)?;
        if !stderr.trim().is_empty() {
            debug!(program = %self.program, stderr = %stderr.trim(), "grammar engine stderr");
        }
        parse_grammalecte_output(&stdout)
    }

    fn provision(&self) -> Result<(), EngineError> {
        let Some((program, args)) = self.install_command.split_first() else {
            return Err(EngineError::Unavailable {
                program: self.program.clone(),
                reason: "no install command configured".to_string(),
            });
        };
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .status()?;
        if status.success() {
            Ok(())
        } else {
            Err(EngineError::Unavailable {
                program: self.program.clone(),
                reason: format!("install command `{}` exited with {}", program, status),
            })
        }
    }
}

// ============================================================
// Grammalecte JSON output
// ============================================================

#[derive(Debug, Deserialize)]
struct GrammalecteOutput {
    data: Vec<GrammalecteParagraph>,
}

#[derive(Debug, Deserialize)]
struct GrammalecteParagraph {
    #[serde(rename = "iParagraph")]
    paragraph: usize,
    #[serde(rename = "lGrammarErrors", default)]
    grammar_errors: Vec<GrammalecteGrammarError>,
    #[serde(rename = "lSpellingErrors", default)]
    spelling_errors: Vec<GrammalecteSpellingError>,
}

#[derive(Debug, Deserialize)]
struct GrammalecteGrammarError {
    #[serde(rename = "nStart")]
    start: usize,
    #[serde(rename = "nEnd")]
    end: usize,
    #[serde(rename = "sRuleId")]
    rule_id: String,
    #[serde(rename = "sMessage")]
    message: String,
}

#[derive(Debug, Deserialize)]
struct GrammalecteSpellingError {
    #[serde(rename = "nStart")]
    start: usize,
    #[serde(rename = "nEnd")]
    end: usize,
    #[serde(rename = "sValue")]
    value: String,
}

/// Decode `grammalecte-cli.py --json` output. Empty output means no error.
pub fn parse_grammalecte_output(stdout: &str) -> Result<Vec<EngineFinding>, EngineError> {
    if stdout.trim().is_empty() {
        return Ok(Vec::new());
    }
    let output: GrammalecteOutput =
        serde_json::from_str(stdout).map_err(|e| EngineError::Protocol(e.to_string()))?;

    let mut findings = Vec::new();
    for paragraph in output.data {
        findings.extend(paragraph.grammar_errors.into_iter().map(|e| {
            EngineFinding::grammar(paragraph.paragraph, e.start, e.end, e.rule_id, e.message)
        }));
        findings.extend(
            paragraph
                .spelling_errors
                .into_iter()
                .map(|e| EngineFinding::spelling(paragraph.paragraph, e.start, e.end, e.value)),
        );
    }
    Ok(findings)
}

// ============================================================
// Filters
// ============================================================

/// Rules already covered by the double-space and NBSP checkers.
const DUPLICATED_RULES: &[&str] = &[
    "esp_milieu_ligne",
    "nbsp_avant_deux_points",
    "nbsp_avant_double_ponctuation",
];

const SINGLE_QUOTE_RULE: &str = "typo_guillemets_typographiques_simples";

const KNOWN_FALSE_POSITIVES: &[&str] = &[
    "Accord de genre erroné : « ABC » est masculin.",
    "Accord de genre erroné : « PEP » est masculin.",
    "Accord de nombre erroné : « PEP » devrait être au pluriel.",
    "Accord de genre erroné : « une entrée » est féminin, « utilisateur » est masculin.",
];

const IMPERATIVE_HINT: &str = "S’il s’agit d’un impératif";

type GrammarFilter = fn(&EngineFinding) -> bool;

const GRAMMAR_FILTERS: &[GrammarFilter] = &[
    duplicated_rule,
    single_quote_typography,
    known_false_positive,
    leading_imperative,
];

fn duplicated_rule(finding: &EngineFinding) -> bool {
    DUPLICATED_RULES.contains(&finding.rule_or_word.as_str())
}

fn single_quote_typography(finding: &EngineFinding) -> bool {
    finding.rule_or_word.contains(SINGLE_QUOTE_RULE)
}

fn known_false_positive(finding: &EngineFinding) -> bool {
    KNOWN_FALSE_POSITIVES.contains(&finding.message.as_str())
}

/// Documentation often starts with an instruction.
fn leading_imperative(finding: &EngineFinding) -> bool {
    finding.start == 0 && finding.message.contains(IMPERATIVE_HINT)
}

// ============================================================
// Checker
// ============================================================

pub struct GrammarChecker {
    engine: Box<dyn GrammarEngine>,
    glossary: Arc<Glossary>,
    dictionary: Arc<PersonalDictionary>,
    /// Outcome of the one provisioning attempt. Concurrent callers wait for
    /// it instead of failing while it runs.
    provisioned: OnceLock<Result<(), String>>,
}

impl GrammarChecker {
    pub fn new(
        engine: Box<dyn GrammarEngine>,
        glossary: Arc<Glossary>,
        dictionary: Arc<PersonalDictionary>,
    ) -> Self {
        Self {
            engine,
            glossary,
            dictionary,
            provisioned: OnceLock::new(),
        }
    }

    fn analyze(&self, text: &str) -> Result<Vec<EngineFinding>, EngineError> {
        match self.engine.analyze(text) {
            Err(EngineError::Unavailable { program, reason }) => {
                let provisioned = self.provisioned.get_or_init(|| {
                    warn!(%program, %reason, "grammar engine unavailable, trying to install it");
                    self.engine.provision().map_err(|e| e.to_string())
                });
                match provisioned {
                    Ok(()) => self.engine.analyze(text),
                    Err(reason) => Err(EngineError::Unavailable {
                        program,
                        reason: reason.clone(),
                    }),
                }
            }
            result => result,
        }
    }

    fn is_filtered(&self, finding: &EngineFinding) -> bool {
        match finding.category {
            FindingCategory::Grammar => GRAMMAR_FILTERS.iter().any(|filter| filter(finding)),
            FindingCategory::Spelling => {
                let word = finding.rule_or_word.as_str();
                (!word.is_empty() && word.chars().all(|c| c == PLACEHOLDER))
                    || self.dictionary.contains(word)
                    || word.ends_with('_')
                    || self.glossary.contains_term(word)
            }
        }
    }
}

/// Text sent to the engine for a catalog.
pub fn engine_input(normalized: &[String]) -> String {
    normalized
        .iter()
        .map(|text| mask_quoted(text))
        .collect::<Vec<_>>()
        .join(PARAGRAPH_SEPARATOR)
}

fn format_finding(finding: &EngineFinding, normalized: &str) -> String {
    let context = char_slice(
        normalized,
        finding.start.saturating_sub(CONTEXT_BEFORE),
        finding.end + CONTEXT_AFTER,
    );
    match finding.category {
        FindingCategory::Grammar => format!("{} => ###{}###", finding.message, context),
        FindingCategory::Spelling => {
            format!("Unknown word \"{}\" in ###{}###", finding.rule_or_word, context)
        }
    }
}

impl Checker for GrammarChecker {
    fn name(&self) -> &'static str {
        NAME
    }

    /// Findings need the whole catalog, see [`Checker::check_catalog`].
    fn check_entry(&self, _entry: &mut Entry) {}

    fn check_catalog(&self, catalog: &mut Catalog) -> Result<(), CheckError> {
        if catalog.entries.is_empty() {
            return Ok(());
        }
        let normalized: Vec<String> = catalog
            .entries
            .iter()
            .map(Entry::normalized_translation)
            .collect();

        let findings = self.analyze(&engine_input(&normalized))?;

        let mut kept: Vec<&EngineFinding> = findings
            .iter()
            .filter(|f| !self.is_filtered(f))
            .collect();
        if let Some(stray) = kept.iter().find(|f| f.paragraph / 2 >= catalog.entries.len()) {
            return Err(EngineError::Protocol(format!(
                "paragraph {} does not match any of the {} entries",
                stray.paragraph,
                catalog.entries.len()
            ))
            .into());
        }
        // Grammar findings are reported before spelling ones.
        kept.sort_by_key(|f| f.category == FindingCategory::Spelling);

        debug!(
            path = %catalog.path.display(),
            total = findings.len(),
            kept = kept.len(),
            "grammar engine findings"
        );
        for finding in kept {
            let index = finding.paragraph / 2;
            let message = format_finding(finding, &normalized[index]);
            catalog.entries[index].add_warning(NAME, message);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    };

    use crate::rules::grammar::*;

    /// Engine answering canned findings and recording what it was sent.
    struct FakeEngine {
        findings: Vec<EngineFinding>,
        unavailable_until_provisioned: bool,
        provisioned: AtomicBool,
        calls: Arc<AtomicUsize>,
        received: Arc<Mutex<Option<String>>>,
    }

    impl FakeEngine {
        fn new(findings: Vec<EngineFinding>) -> Self {
            Self {
                findings,
                unavailable_until_provisioned: false,
                provisioned: AtomicBool::new(false),
                calls: Arc::new(AtomicUsize::new(0)),
                received: Arc::new(Mutex::new(None)),
            }
        }
    }

    impl GrammarEngine for FakeEngine {
        fn name(&self) -> &str {
            "fake"
        }

        fn analyze(&self, text: &str) -> Result<Vec<EngineFinding>, EngineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.unavailable_until_provisioned && !self.provisioned.load(Ordering::SeqCst) {
                return Err(EngineError::Unavailable {
                    program: "fake".to_string(),
                    reason: "not installed".to_string(),
                });
            }
            *self.received.lock().unwrap() = Some(text.to_string());
            Ok(self.findings.clone())
        }

        fn provision(&self) -> Result<(), EngineError> {
            self.provisioned.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    fn checker(engine: FakeEngine) -> GrammarChecker {
        let mut dictionary = PersonalDictionary::new();
        dictionary.insert("docstring");
        GrammarChecker::new(
            Box::new(engine),
            Arc::new(Glossary::builtin()),
            Arc::new(dictionary),
        )
    }

    fn catalog(translations: &[&str]) -> Catalog {
        let entries = translations
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let mut entry = Entry::new("ref", i * 4 + 1);
                entry.msgstr = vec![t.to_string()];
                entry
            })
            .collect();
        Catalog::new("fr.po", entries)
    }

    fn messages(catalog: &Catalog) -> Vec<Vec<String>> {
        catalog
            .entries
            .iter()
            .map(|e| e.findings().iter().map(|f| f.message.clone()).collect())
            .collect()
    }

    #[test]
    fn test_engine_input_masks_quoted_spans() {
        let engine = FakeEngine::new(Vec::new());
        let received = engine.received.clone();
        let mut catalog = catalog(&["Appelez ``len()`` ici", "Bonjour"]);

        checker(engine).check_catalog(&mut catalog).unwrap();
        assert_eq!(
            received.lock().unwrap().as_deref(),
            Some("Appelez «\u{a0}xxxxx\u{a0}» ici\n\nBonjour")
        );
    }

    #[test]
    fn test_findings_go_to_paragraph_entry() {
        let engine = FakeEngine::new(vec![
            EngineFinding::spelling(2, 4, 9, "mondr"),
            EngineFinding::grammar(0, 0, 2, "conj", "Conjugaison erronée."),
        ]);
        let mut catalog = catalog(&["Il sont là", "Le mondr est grand"]);

        checker(engine).check_catalog(&mut catalog).unwrap();
        assert_eq!(
            messages(&catalog),
            vec![
                vec!["Conjugaison erronée. => ###Il sont là###".to_string()],
                vec!["Unknown word \"mondr\" in ###Le mondr est grand###".to_string()],
            ]
        );
        assert_eq!(catalog.entries[0].findings()[0].checker, "Grammalecte");
    }

    #[test]
    fn test_grammar_before_spelling() {
        let engine = FakeEngine::new(vec![
            EngineFinding::spelling(0, 0, 2, "Il"),
            EngineFinding::grammar(0, 3, 7, "conj", "Conjugaison."),
        ]);
        let mut catalog = catalog(&["Il sont là"]);

        checker(engine).check_catalog(&mut catalog).unwrap();
        let messages = &messages(&catalog)[0];
        assert!(messages[0].starts_with("Conjugaison."));
        assert!(messages[1].starts_with("Unknown word"));
    }

    #[test]
    fn test_filtered_grammar_findings() {
        let engine = FakeEngine::new(vec![
            EngineFinding::grammar(0, 3, 5, "esp_milieu_ligne", "Espace(s) en trop."),
            EngineFinding::grammar(0, 3, 5, "nbsp_avant_deux_points", "Espace insécable."),
            EngineFinding::grammar(0, 3, 5, "typo_guillemets_typographiques_simples_doubles_ouvrants", "Guillemets."),
            EngineFinding::grammar(0, 3, 5, "gn_2m_det", "Accord de genre erroné : « PEP » est masculin."),
            EngineFinding::grammar(0, 0, 5, "imp", "Conjugaison. S’il s’agit d’un impératif, mettez un trait d’union."),
            EngineFinding::grammar(0, 4, 8, "imp", "Conjugaison. S’il s’agit d’un impératif, mettez un trait d’union."),
        ]);
        let mut catalog = catalog(&["Utilisez la PEP 8"]);

        checker(engine).check_catalog(&mut catalog).unwrap();
        assert_eq!(messages(&catalog)[0].len(), 1);
    }

    #[test]
    fn test_filtered_spelling_findings() {
        let engine = FakeEngine::new(vec![
            EngineFinding::spelling(0, 0, 5, "xxxxx"),
            EngineFinding::spelling(0, 0, 9, "docstring"),
            EngineFinding::spelling(0, 0, 9, "Docstring"),
            EngineFinding::spelling(0, 0, 7, "__init_"),
            EngineFinding::spelling(0, 0, 7, "CPython"),
            EngineFinding::spelling(0, 0, 7, "coroutine"),
            EngineFinding::spelling(0, 0, 7, "truc"),
        ]);
        let mut catalog = catalog(&["truc"]);

        checker(engine).check_catalog(&mut catalog).unwrap();
        assert_eq!(messages(&catalog), vec![vec!["Unknown word \"truc\" in ###truc###"]]);
    }

    #[test]
    fn test_context_window() {
        let text = format!("{}fautte{}", "a".repeat(50), "b".repeat(20));
        let engine = FakeEngine::new(vec![EngineFinding::spelling(0, 50, 56, "fautte")]);
        let mut catalog = catalog(&[text.as_str()]);

        checker(engine).check_catalog(&mut catalog).unwrap();
        assert_eq!(
            messages(&catalog)[0][0],
            format!("Unknown word \"fautte\" in ###{}fautte{}###", "a".repeat(40), "b".repeat(10))
        );
    }

    #[test]
    fn test_stray_paragraph_is_protocol_error() {
        let engine = FakeEngine::new(vec![
            EngineFinding::spelling(0, 0, 4, "truc"),
            EngineFinding::spelling(4, 0, 4, "truc"),
        ]);
        let mut catalog = catalog(&["truc", "truc"]);

        let err = checker(engine).check_catalog(&mut catalog).unwrap_err();
        assert!(matches!(err, CheckError::Engine(EngineError::Protocol(_))));
        assert_eq!(catalog.finding_count(), 0);
    }

    #[test]
    fn test_provisioning_then_retry() {
        let mut engine = FakeEngine::new(vec![EngineFinding::spelling(0, 0, 4, "truc")]);
        engine.unavailable_until_provisioned = true;
        let calls = engine.calls.clone();
        let mut catalog = catalog(&["truc"]);

        checker(engine).check_catalog(&mut catalog).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(catalog.finding_count(), 1);
    }

    #[test]
    fn test_provisioning_attempted_once() {
        struct MissingEngine(Arc<AtomicUsize>);
        impl GrammarEngine for MissingEngine {
            fn name(&self) -> &str {
                "missing"
            }
            fn analyze(&self, _text: &str) -> Result<Vec<EngineFinding>, EngineError> {
                Err(EngineError::Unavailable {
                    program: "missing".to_string(),
                    reason: "not found".to_string(),
                })
            }
            fn provision(&self) -> Result<(), EngineError> {
                self.0.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }

        let provisions = Arc::new(AtomicUsize::new(0));
        let checker = GrammarChecker::new(
            Box::new(MissingEngine(provisions.clone())),
            Arc::new(Glossary::builtin()),
            Arc::new(PersonalDictionary::new()),
        );
        assert!(checker.check_catalog(&mut catalog(&["a"])).is_err());
        assert!(checker.check_catalog(&mut catalog(&["b"])).is_err());
        assert_eq!(provisions.load(Ordering::SeqCst), 1);
    }

    /// Unavailable until a slow install has completed.
    struct SlowInstallEngine {
        installed: AtomicBool,
        provisions: Arc<AtomicUsize>,
    }

    impl GrammarEngine for SlowInstallEngine {
        fn name(&self) -> &str {
            "slow"
        }

        fn analyze(&self, _text: &str) -> Result<Vec<EngineFinding>, EngineError> {
            if !self.installed.load(Ordering::SeqCst) {
                return Err(EngineError::Unavailable {
                    program: "slow".to_string(),
                    reason: "not installed".to_string(),
                });
            }
            Ok(vec![EngineFinding::spelling(0, 0, 4, "truc")])
        }

        fn provision(&self) -> Result<(), EngineError> {
            self.provisions.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(200));
            self.installed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_concurrent_catalogs_wait_for_provisioning() {
        let provisions = Arc::new(AtomicUsize::new(0));
        let checker = GrammarChecker::new(
            Box::new(SlowInstallEngine {
                installed: AtomicBool::new(false),
                provisions: provisions.clone(),
            }),
            Arc::new(Glossary::builtin()),
            Arc::new(PersonalDictionary::new()),
        );
        let mut catalogs: Vec<Catalog> = (0..8).map(|_| catalog(&["truc"])).collect();

        let results: Vec<Result<(), CheckError>> = thread::scope(|scope| {
            let handles: Vec<_> = catalogs
                .iter_mut()
                .map(|catalog| {
                    let checker = &checker;
                    scope.spawn(move || checker.check_catalog(catalog))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(results.iter().all(Result::is_ok));
        assert_eq!(provisions.load(Ordering::SeqCst), 1);
        assert!(catalogs.iter().all(|c| c.finding_count() == 1));
    }

    #[test]
    fn test_failed_provisioning_is_not_retried() {
        let provisions = Arc::new(AtomicUsize::new(0));
        struct BrokenInstall(Arc<AtomicUsize>);
        impl GrammarEngine for BrokenInstall {
            fn name(&self) -> &str {
                "broken"
            }
            fn analyze(&self, _text: &str) -> Result<Vec<EngineFinding>, EngineError> {
                Err(EngineError::Unavailable {
                    program: "broken".to_string(),
                    reason: "not found".to_string(),
                })
            }
            fn provision(&self) -> Result<(), EngineError> {
                self.0.fetch_add(1, Ordering::SeqCst);
                Err(EngineError::Unavailable {
                    program: "broken".to_string(),
                    reason: "install failed".to_string(),
                })
            }
        }

        let checker = GrammarChecker::new(
            Box::new(BrokenInstall(provisions.clone())),
            Arc::new(Glossary::builtin()),
            Arc::new(PersonalDictionary::new()),
        );
        for _ in 0..3 {
            let err = checker.check_catalog(&mut catalog(&["a"])).unwrap_err();
            assert!(err.to_string().contains("install failed"));
        }
        assert_eq!(provisions.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_empty_catalog_skips_engine() {
        let engine = FakeEngine::new(Vec::new());
        let calls = engine.calls.clone();
        checker(engine).check_catalog(&mut catalog(&[])).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_parse_grammalecte_output() {
        let stdout = r#"{
            "grammalecte": "1.5.0",
            "lang": "fr",
            "data": [
                {
                    "iParagraph": 4,
                    "lGrammarErrors": [
                        {"nStart": 3, "nEnd": 7, "sRuleId": "conj_ils", "sMessage": "Conjugaison.", "aSuggestions": ["sont"]}
                    ],
                    "lSpellingErrors": [
                        {"nStart": 10, "nEnd": 15, "sValue": "mondr", "sType": "WORD"}
                    ]
                }
            ]
        }"#;
        let findings = parse_grammalecte_output(stdout).unwrap();
        assert_eq!(
            findings,
            vec![
                EngineFinding::grammar(4, 3, 7, "conj_ils", "Conjugaison."),
                EngineFinding::spelling(4, 10, 15, "mondr"),
            ]
        );
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_grammalecte_output("").unwrap().is_empty());
        assert!(parse_grammalecte_output("\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_garbage_output() {
        let err = parse_grammalecte_output("Traceback (most recent call last):").unwrap_err();
        assert!(matches!(err, EngineError::Protocol(_)));
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        let engine = GrammalecteCli {
            program: "polint-missing-grammar-engine".to_string(),
            args: Vec::new(),
            timeout: Duration::from_secs(5),
            install_command: Vec::new(),
        };
        let err = engine.analyze("Bonjour").unwrap_err();
        assert!(matches!(err, EngineError::Unavailable { .. }));
        assert!(matches!(
            engine.provision().unwrap_err(),
            EngineError::Unavailable { .. }
        ));
    }
}
