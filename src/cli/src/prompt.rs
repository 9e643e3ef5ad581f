// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! An interactive confirmation prompt on the terminal.

use iaas::builder::Confirm;
use std::io::{BufRead, Write};

/// Asks for confirmation on stderr and reads the answer from stdin.
#[derive(Clone, Debug, Default)]
pub struct Terminal;

impl Confirm for Terminal {
    fn confirm(&self, target: &str, action: &str) -> bool {
        let stdin = std::io::stdin();
        let stderr = std::io::stderr();
        ask(&mut stdin.lock(), &mut stderr.lock(), target, action)
    }
}

/// Writes the question to `output` and reads one line from `input`.
///
/// Any I/O error, including end of input, counts as a refusal.
pub fn ask<R, W>(input: &mut R, output: &mut W, target: &str, action: &str) -> bool
where
    R: BufRead,
    W: Write,
{
    let question = format!(
        "Confirm\nAre you sure you want to perform this action?\n\
         Performing the operation \"{action}\" on target \"{target}\".\n\
         [Y] Yes  [N] No (default is \"N\"): "
    );
    if let Err(e) = output.write_all(question.as_bytes()).and_then(|_| output.flush()) {
        tracing::warn!("cannot write the confirmation prompt: {e}");
        return false;
    }
    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(0) => false,
        Ok(_) => is_yes(&answer),
        Err(e) => {
            tracing::warn!("cannot read the confirmation answer: {e}");
            false
        }
    }
}

fn is_yes(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use test_case::test_case;

    #[test_case("y\n", true)]
    #[test_case("Y\n", true)]
    #[test_case("yes\n", true)]
    #[test_case("  YES  \r\n", true)]
    #[test_case("n\n", false)]
    #[test_case("\n", false)]
    #[test_case("yep\n", false)]
    #[test_case("", false; "end of input")]
    fn answers(input: &str, want: bool) {
        let mut input = Cursor::new(input.as_bytes());
        let mut output = Vec::new();
        assert_eq!(ask(&mut input, &mut output, "disk1", "Create block device"), want);
    }

    #[test]
    fn question() {
        let mut input = Cursor::new("n\n".as_bytes());
        let mut output = Vec::new();
        let _ = ask(&mut input, &mut output, "disk1", "Create block device");
        let got = String::from_utf8_lossy(&output);
        assert!(got.contains("\"Create block device\""), "{got}");
        assert!(got.contains("\"disk1\""), "{got}");
    }
}
