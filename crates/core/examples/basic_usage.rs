//! Basic usage example of the chatwer library

use chatwer_core::{
    compute_wer, render, CharacterTokenizer, WerConfig, WerEngine, WerPolicy,
};

const LINE: &str = "----------------------------------------";

fn main() {
    println!("=== ChatWER Library Examples ===\n");

    // Example 1: Simple whole-text WER
    example_simple_wer();

    // Example 2: Annotation-aware tokenization
    example_annotations();

    // Example 3: Line-by-line and annotation-only policies
    example_policies();

    // Example 4: Marked side-by-side rendering
    example_marked_output();
}

fn example_simple_wer() {
    println!("Example 1: Simple WER");
    println!("{}", LINE);

    let reference = "this is test b a";
    let candidate = "this is a test b";

    let result = compute_wer(reference, candidate, None);

    println!("Reference: {}", reference);
    println!("Candidate: {}", candidate);
    println!(
        "\nEdit distance: {} over {} tokens, WER {:.2}",
        result.edit_distance,
        result.reference_length,
        result.rate()
    );

    // Character granularity via a different tokenizer
    let config = WerConfig::default().with_tokenizer(Box::new(CharacterTokenizer));
    let chars = compute_wer("smtih", "smith", Some(config));
    println!(
        "Character level: smtih vs smith -> distance {}",
        chars.edit_distance
    );
    println!("\n");
}

fn example_annotations() {
    println!("Example 2: Annotation-Aware Tokenization");
    println!("{}", LINE);

    let reference = "<I wanted> [/] I wanted to invite Margie .";
    let candidate = "I wanted to invite Margie .";

    let result = compute_wer(reference, candidate, None);

    println!("Reference: {}", reference);
    println!("Candidate: {}", candidate);
    println!(
        "\nThe retracing marker stays one token: distance {}, WER {:.2}",
        result.edit_distance,
        result.rate()
    );
    println!("\n");
}

fn example_policies() {
    println!("Example 3: Comparison Policies");
    println!("{}", LINE);

    let reference = "now the rabbit can dump the sand .\n&-um and then the castle .";
    let candidate = "now the rabbits dump the sand .\n&-uh and then a castle .";

    for policy in [
        WerPolicy::WholeText,
        WerPolicy::LineByLine,
        WerPolicy::AnnotationOnlyWholeText,
    ] {
        let config = WerConfig::default().with_policy(policy);
        let result = compute_wer(reference, candidate, Some(config));
        println!(
            "  {:?}: distance {} over {} tokens, WER {:.2}",
            policy,
            result.edit_distance,
            result.reference_length,
            result.rate()
        );
    }

    let report = WerEngine::new(WerConfig::default().with_policy(WerPolicy::LineByLine))
        .compute_report(reference, candidate);
    println!("\nPer-line breakdown:");
    for line in &report.lines {
        println!(
            "  line {}: distance {}, WER {:.2}",
            line.index,
            line.result.edit_distance,
            line.result.rate()
        );
    }
    println!("\n");
}

fn example_marked_output() {
    println!("Example 4: Marked Side-by-Side Output");
    println!("{}", LINE);

    let reference = "now the rabbits can dump the sand";
    let candidate = "and now the rabbit dumped sand";

    let engine = WerEngine::default();
    let (marked_ref, marked_cand) = engine.mark_changes(reference, candidate);

    println!("Reference: {}", render(&marked_ref));
    println!("Candidate: {}", render(&marked_cand));
    println!();
}
