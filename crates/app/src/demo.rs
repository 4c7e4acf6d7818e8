use services::api::BankQuestion;

/// Seconds allowed for an offline attempt.
pub const DEMO_TIME_LIMIT_SECS: u32 = 10 * 60;

/// Built-in question bank used by `--offline`.
pub fn demo_bank() -> Vec<BankQuestion> {
    vec![
        BankQuestion::single(
            "ownership-1",
            "What happens to a `String` after it is moved into a function?",
            10,
            &[
                ("copied", "It is copied and both bindings stay usable"),
                ("moved", "The original binding can no longer be used"),
                ("borrowed", "It is borrowed automatically"),
            ],
            "moved",
        ),
        BankQuestion::multiple(
            "traits-1",
            "Which of these traits are auto traits?",
            20,
            &[
                ("send", "Send"),
                ("clone", "Clone"),
                ("sync", "Sync"),
                ("debug", "Debug"),
            ],
            &["send", "sync"],
        ),
        BankQuestion::single(
            "option-1",
            "Which method turns `Option<T>` into `Result<T, E>`?",
            10,
            &[
                ("ok_or", "ok_or"),
                ("unwrap_or", "unwrap_or"),
                ("map", "map"),
            ],
            "ok_or",
        ),
        BankQuestion::essay(
            "lifetimes-1",
            "In one or two sentences, explain what a lifetime annotation tells the compiler.",
            15,
        ),
    ]
}
