use crate::commands::CmdResult;
use crate::error::Result;
use crate::generator;

pub fn run(length: usize) -> Result<CmdResult> {
    let password = generator::generate(length)?;
    Ok(CmdResult::default().with_generated(password))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PwdmError;

    #[test]
    fn generates_requested_length() {
        let result = run(20).unwrap();
        assert_eq!(result.generated.unwrap().chars().count(), 20);
    }

    #[test]
    fn rejects_short_length() {
        assert!(matches!(run(7), Err(PwdmError::Validation(_))));
    }
}
