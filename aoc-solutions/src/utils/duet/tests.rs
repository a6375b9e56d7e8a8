//! Tests for the duet register machine.

use super::*;
use proptest::prelude::*;

fn duet(source: &str) -> Program {
    Program::parse(source, Dialect::Duet).unwrap()
}

#[test]
fn test_solo_recovers_last_sent_value() {
    let program = duet(
        "set a 1\nadd a 2\nmul a a\nmod a 5\nsnd a\nset a 0\nrcv a\njgz a -1\nset a 1\njgz a -2",
    );

    let outcome = run_solo(&program).unwrap();
    assert_eq!(outcome, SoloOutcome::Recovered(4));
    assert_eq!(outcome.value(), 4);
}

#[test]
fn test_solo_exit_is_distinct_from_recovering_zero() {
    let exited = run_solo(&duet("set a 3\nadd a 4")).unwrap();
    assert_eq!(exited, SoloOutcome::Exited);
    assert_eq!(exited.value(), 0);

    // rcv fires on a non-zero operand even though nothing was sent
    let recovered = run_solo(&duet("rcv 1")).unwrap();
    assert_eq!(recovered, SoloOutcome::Recovered(0));
    assert_eq!(recovered.value(), 0);
}

#[test]
fn test_solo_backward_jump_out_of_program_exits() {
    let program = duet("add a 1\njgz a -5");
    let mut solo = Solo::with_registers(&program, Registers::with("a", 1));
    assert_eq!(solo.run().unwrap(), SoloOutcome::Exited);
    assert_eq!(solo.registers().get("a"), 2);
}

#[test]
fn test_duet_exchanges_ids_without_deadlock() {
    let report = run_duet(&duet("snd p\nrcv b")).unwrap();

    assert_eq!(report.halt, HaltReason::Terminated);
    assert_eq!(report.sent, [1, 1]);
    assert_eq!(report.received, [1, 1]);
    assert_eq!(report.sent_by(1), 1);
    assert_eq!(report.status, [Status::Terminated, Status::Terminated]);
    assert_eq!(report.registers[0].get("b"), 1);
    assert_eq!(report.registers[1].get("b"), 0);
}

#[test]
fn test_duet_detects_mutual_deadlock() {
    let report = run_duet(&duet("rcv a\nrcv b")).unwrap();

    assert_eq!(report.halt, HaltReason::Deadlock);
    assert_eq!(report.sent, [0, 0]);
    assert_eq!(report.status, [Status::Blocked, Status::Blocked]);
}

#[test]
fn test_duet_halts_when_finished_peer_leaves_other_starving() {
    // program 1 jumps past its rcv; program 0 waits for a value that never comes
    let report = run_duet(&duet("set a p\njgz a 2\nrcv b")).unwrap();

    assert_eq!(report.halt, HaltReason::Terminated);
    assert_eq!(report.status, [Status::Blocked, Status::Terminated]);
}

#[test]
fn test_duet_queues_preserve_order() {
    let report = run_duet(&duet(
        "jgz p 4\nrcv a\nrcv b\nrcv c\nsnd 7\nsnd 8\nsnd 9",
    ))
    .unwrap();

    let receiver = &report.registers[0];
    assert_eq!(
        (receiver.get("a"), receiver.get("b"), receiver.get("c")),
        (7, 8, 9)
    );
    assert_eq!(report.sent_by(1), 3);
}

#[test]
fn test_duet_counts_sends_of_program_one_in_loop() {
    // each program sends p+1 values: 1 for program 0, 2 for program 1
    let report = run_duet(&duet("set i p\nadd i 1\nsnd i\nadd i -1\njgz i -2")).unwrap();

    assert_eq!(report.sent, [1, 2]);
    assert_eq!(report.pending, [2, 1]);
    assert_eq!(report.halt, HaltReason::Terminated);
}

#[test]
fn test_runtime_fault_aborts_run() {
    let err = run_duet(&duet("mod a 0")).unwrap_err();
    assert_eq!(err, DuetError::ModuloByZero { pc: 0 });
}

#[test]
fn test_decode_rejects_unknown_opcode() {
    assert_eq!(
        Instruction::decode("jmp a 1", Dialect::Duet),
        Err(DecodeError::UnsupportedOpcode("jmp".to_string()))
    );
    assert_eq!(
        Instruction::decode("sub a 1", Dialect::Duet),
        Err(DecodeError::UnsupportedOpcode("sub".to_string()))
    );
    assert_eq!(
        Instruction::decode("snd a", Dialect::Coprocessor),
        Err(DecodeError::UnsupportedOpcode("snd".to_string()))
    );
}

#[test]
fn test_decode_checks_operand_count() {
    assert_eq!(
        Instruction::decode("snd a b", Dialect::Duet),
        Err(DecodeError::OperandCount {
            opcode: Opcode::Snd,
            expected: 1,
            found: 2,
        })
    );
    assert_eq!(
        Instruction::decode("set a", Dialect::Duet),
        Err(DecodeError::OperandCount {
            opcode: Opcode::Set,
            expected: 2,
            found: 1,
        })
    );
    assert_eq!(
        Instruction::from_tokens::<&str>(&[], Dialect::Duet),
        Err(DecodeError::EmptyInstruction)
    );
}

#[test]
fn test_program_parse_reports_first_bad_line() {
    let err = Program::parse("set a 1\n\nmul a\nfoo", Dialect::Duet).unwrap_err();
    assert_eq!(
        err,
        DuetError::MalformedInstruction {
            line: 3,
            source: DecodeError::OperandCount {
                opcode: Opcode::Mul,
                expected: 2,
                found: 1,
            },
        }
    );
    assert_eq!(err.to_string(), "malformed instruction on line 3: `mul` takes 2 operand(s), found 1");
}

#[test]
fn test_program_skips_blank_lines_and_displays_source() {
    let program = duet("set a 1\n\n  snd a  \n");
    assert_eq!(program.len(), 2);
    assert_eq!(program.dialect(), Dialect::Duet);
    assert_eq!(program.to_string(), "set a 1\nsnd a\n");
    assert_eq!(program.fetch(1).map(Instruction::opcode), Some(Opcode::Snd));
    assert_eq!(program.fetch(-1), None);
    assert_eq!(program.fetch(2), None);
}

#[test]
fn test_coprocessor_counts_multiplications() {
    let program = Program::parse(
        "set b 3\nset c 1\nmul c b\nsub b 1\njnz b -2",
        Dialect::Coprocessor,
    )
    .unwrap();

    let report = run_coprocessor(&program, Registers::new()).unwrap();
    assert_eq!(report.multiplications, 3);
    assert_eq!(report.registers.get("c"), 6);
    assert_eq!(report.registers.get("b"), 0);
}

#[test]
fn test_coprocessor_refuses_duet_io() {
    let err = run_coprocessor(&duet("set a 1\nsnd a"), Registers::new()).unwrap_err();
    assert_eq!(
        err,
        DuetError::MalformedInstruction {
            line: 2,
            source: DecodeError::UnsupportedOpcode("snd".to_string()),
        }
    );
}

#[test]
fn test_coprocessor_refuses_duet_arithmetic() {
    let program = duet("set a 7\nmod a 4\nadd a 1\njgz a 1\nmul a 2");

    let err = run_coprocessor(&program, Registers::new()).unwrap_err();
    assert_eq!(
        err,
        DuetError::MalformedInstruction {
            line: 2,
            source: DecodeError::UnsupportedOpcode("mod".to_string()),
        }
    );
}

#[test]
fn test_duet_executors_refuse_coprocessor_opcodes() {
    let program = Program::parse("set a 3\nsub a 1\njnz a -1", Dialect::Coprocessor).unwrap();
    let expected = DuetError::MalformedInstruction {
        line: 2,
        source: DecodeError::UnsupportedOpcode("sub".to_string()),
    };

    assert_eq!(run_solo(&program).unwrap_err(), expected);
    assert_eq!(run_duet(&program).unwrap_err(), expected);
}

#[test]
fn test_rejected_opcode_reports_source_line() {
    let source = "set a 1\n\n\nsnd a";
    assert_eq!(
        Program::parse(source, Dialect::Coprocessor).unwrap_err(),
        DuetError::MalformedInstruction {
            line: 4,
            source: DecodeError::UnsupportedOpcode("snd".to_string()),
        }
    );

    let program = duet(source);
    assert_eq!((program.line(0), program.line(1), program.line(2)), (Some(1), Some(4), None));
    assert_eq!(
        run_coprocessor(&program, Registers::new()).unwrap_err(),
        DuetError::MalformedInstruction {
            line: 4,
            source: DecodeError::UnsupportedOpcode("snd".to_string()),
        }
    );
}

fn register() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "p"]).prop_map(str::to_string)
}

fn operand() -> impl Strategy<Value = String> {
    prop_oneof![register(), (-20i64..=20).prop_map(|n| n.to_string())]
}

/// Straight-line instructions that can neither jump nor overflow
fn straight_line() -> impl Strategy<Value = String> {
    prop_oneof![
        (register(), operand()).prop_map(|(x, y)| format!("set {} {}", x, y)),
        (register(), -100i64..=100).prop_map(|(x, y)| format!("add {} {}", x, y)),
        (register(), -3i64..=3).prop_map(|(x, y)| format!("mul {} {}", x, y)),
        (register(), 1i64..=9).prop_map(|(x, y)| format!("mod {} {}", x, y)),
        operand().prop_map(|x| format!("snd {}", x)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_decode_is_lossless(
        opcode in prop::sample::select(Dialect::Duet.opcodes().to_vec()),
        x in operand(),
        y in operand(),
    ) {
        let mut tokens = vec![opcode.mnemonic().to_string(), x];
        if opcode.arity() == 2 {
            tokens.push(y);
        }
        let line = tokens.join(" ");

        let instruction = Instruction::decode(&line, Dialect::Duet).unwrap();
        prop_assert_eq!(instruction.opcode(), opcode);
        prop_assert_eq!(instruction.tokens(), tokens.iter().map(String::as_str).collect::<Vec<_>>());
        prop_assert_eq!(instruction.to_string(), line);
    }

    #[test]
    fn prop_unset_registers_read_zero(name in "[a-z]{1,3}", value in any::<i64>()) {
        let mut registers = Registers::new();
        prop_assert_eq!(registers.get(&name), 0);
        registers.set(&name, value).unwrap();
        prop_assert_eq!(registers.get(&name), value);
        prop_assert_eq!(registers.get(&format!("{}x", name)), 0);
    }

    #[test]
    fn prop_straight_line_programs_exit(lines in prop::collection::vec(straight_line(), 0..12)) {
        let program = duet(&lines.join("\n"));
        let outcome = run_solo(&program).unwrap();
        prop_assert_eq!(outcome, SoloOutcome::Exited);
        prop_assert_eq!(outcome.value(), 0);
    }

    #[test]
    fn prop_rcv_halts_iff_operand_non_zero(
        sent in prop::collection::vec(-50i64..=50, 0..6),
        trigger in -2i64..=2,
    ) {
        let mut lines: Vec<String> = sent
            .iter()
            .flat_map(|v| [format!("set a {}", v), "snd a".to_string()])
            .collect();
        lines.push(format!("set t {}", trigger));
        lines.push("rcv t".to_string());

        let outcome = run_solo(&duet(&lines.join("\n"))).unwrap();
        if trigger != 0 {
            prop_assert_eq!(outcome, SoloOutcome::Recovered(sent.last().copied().unwrap_or(0)));
        } else {
            prop_assert_eq!(outcome, SoloOutcome::Exited);
        }
    }

    #[test]
    fn prop_duet_conserves_messages(
        lines in prop::collection::vec(
            prop_oneof![
                straight_line(),
                register().prop_map(|x| format!("rcv {}", x)),
            ],
            0..16,
        ),
    ) {
        let report = run_duet(&duet(&lines.join("\n"))).unwrap();
        for id in 0..2 {
            let peer = 1 - id;
            prop_assert_eq!(
                report.sent[peer],
                report.received[id] + report.pending[id] as u64
            );
        }
    }
}
