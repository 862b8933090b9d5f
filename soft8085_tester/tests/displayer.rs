use soft8085_lib::RunStatus;
use soft8085_tester::{CliDisplayer, Displayer, OutputToken};

use std::{
    io::{ErrorKind, Write},
    sync::{mpsc::channel, Arc, Mutex},
    thread::spawn,
};

type IoResult<T> = std::io::Result<T>;

#[derive(Debug, Default)]
struct Buffer {
    data: Arc<Mutex<Vec<u8>>>,
}

impl Buffer {
    pub fn new(data: Arc<Mutex<Vec<u8>>>) -> Self {
        Self { data }
    }
}

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> IoResult<usize> {
        let length = buf.len();
        self.data
            .lock()
            .map_err(|_| ErrorKind::Other)?
            .extend_from_slice(buf);

        Ok(length)
    }

    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}

fn display(tokens: Vec<OutputToken>, verbose: bool) -> Vec<String> {
    let data = Arc::new(Mutex::new(Vec::new()));
    let join = {
        let (sender, receiver) = channel::<OutputToken>();
        let mut displayer = CliDisplayer::new(Buffer::new(data.clone()), verbose);
        let join = spawn(move || {
            displayer.display(receiver).unwrap();
        });
        for token in tokens {
            sender.send(token).unwrap();
        }

        join
    };
    join.join().unwrap();

    let output = String::from_utf8(data.lock().unwrap().clone()).unwrap();

    output.lines().map(|l| l.to_string()).collect()
}

fn sample_tokens() -> Vec<OutputToken> {
    vec![
        OutputToken::Marker {
            description: "test".to_string(),
        },
        OutputToken::Setup(vec!["3 bytes loaded at #0x0000".to_string()]),
        OutputToken::Run {
            loglines: vec!["#0x0000: (3e 05)    MVI A    #05".to_string()],
            status: RunStatus::Stopped,
        },
        OutputToken::Assertion {
            failure: None,
            description: "assertion".to_string(),
        },
        OutputToken::Assertion {
            failure: Some("this is a failure".to_string()),
            description: "other assertion".to_string(),
        },
    ]
}

#[test]
fn test_displayer() {
    let lines = display(sample_tokens(), false);

    assert_eq!(
        vec![
            "♯ test",
            "01 → assertion ✅",
            "02 → other assertion ❌ this is a failure",
        ],
        lines
    );
}

#[test]
fn test_verbose_displayer() {
    let lines = display(sample_tokens(), true);

    assert_eq!(5, lines.len());
    assert_eq!("⚙ 3 bytes loaded at #0x0000", lines[1]);
    assert_eq!("⚡ #0x0000: (3e 05)    MVI A    #05", lines[2]);
}

#[test]
fn test_views_and_ceiling_are_always_shown() {
    let tokens = vec![
        OutputToken::View(vec!["#0x0800: 3e 05 76".to_string()]),
        OutputToken::Run {
            loglines: vec!["#0x0000: (c3 00 00) JMP      #0000".to_string(); 3],
            status: RunStatus::StepCeilingReached,
        },
    ];
    let lines = display(tokens, false);

    assert_eq!(
        vec![
            "📄 #0x0800: 3e 05 76",
            "⚠ program did not halt after 3 instructions"
        ],
        lines
    );
}
