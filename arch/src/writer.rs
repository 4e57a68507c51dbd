use std::io::Write;

use crate::error::{Error, Result};
use crate::inst::Instruction;
use crate::template::Header;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Empty,
    HeaderWritten,
    RecordWritten,
    Closed,
}

/// Streams a template to an append-only sink.
///
/// `Empty -> HeaderWritten -> RecordWritten* -> Closed`. There is no rollback:
/// after a failed write the sink holds a truncated template. An unclosed
/// writer still flushes its sink when dropped.
pub struct TemplateWriter<W: Write> {
    sink: W,
    state: State,
    declared: u8,
    written: usize,
}

impl<W: Write> TemplateWriter<W> {
    pub fn new(sink: W) -> Self {
        TemplateWriter {
            sink,
            state: State::Empty,
            declared: 0,
            written: 0,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn write_header(&mut self, header: &Header) -> Result<()> {
        match self.state {
            State::Empty => {}
            State::Closed => return Err(Error::WriterClosed),
            _ => return Err(Error::HeaderAlreadyWritten),
        }
        self.sink.write_all(&header.to_bytes()).map_err(Error::Write)?;
        self.declared = header.count;
        self.state = State::HeaderWritten;
        Ok(())
    }

    pub fn write_record(&mut self, inst: &Instruction) -> Result<()> {
        match self.state {
            State::HeaderWritten | State::RecordWritten => {}
            State::Empty => return Err(Error::HeaderMissing),
            State::Closed => return Err(Error::WriterClosed),
        }
        if self.written >= self.declared as usize {
            return Err(Error::CountMismatch {
                declared: self.declared,
                written: self.written + 1,
            });
        }
        self.sink.write_all(&inst.to_bytes()).map_err(Error::Write)?;
        self.written += 1;
        self.state = State::RecordWritten;
        Ok(())
    }

    /// Flushes the sink and checks that every declared record was written.
    /// The writer is closed afterwards even if the check fails.
    pub fn close(&mut self) -> Result<()> {
        match self.state {
            State::Closed => return Err(Error::WriterClosed),
            State::Empty => return Err(Error::HeaderMissing),
            _ => {}
        }
        self.state = State::Closed;
        self.sink.flush().map_err(Error::Write)?;
        if self.written != self.declared as usize {
            return Err(Error::CountMismatch {
                declared: self.declared,
                written: self.written,
            });
        }
        Ok(())
    }
}

impl<W: Write> Drop for TemplateWriter<W> {
    fn drop(&mut self) {
        if self.state != State::Closed {
            let _ = self.sink.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inst::ArgumentCombo;
    use crate::template::FORMAT_VERSION;

    fn nop() -> Instruction {
        Instruction::new("NOP", vec![ArgumentCombo::default()]).unwrap()
    }

    #[test]
    fn transitions() {
        let mut buf = Vec::new();
        let mut writer = TemplateWriter::new(&mut buf);
        assert_eq!(writer.state(), State::Empty);

        writer
            .write_header(&Header::new(FORMAT_VERSION, 2).unwrap())
            .unwrap();
        assert_eq!(writer.state(), State::HeaderWritten);

        writer.write_record(&nop()).unwrap();
        writer.write_record(&nop()).unwrap();
        assert_eq!(writer.state(), State::RecordWritten);
        assert_eq!(writer.written(), 2);

        writer.close().unwrap();
        assert_eq!(writer.state(), State::Closed);
        assert!(matches!(writer.write_record(&nop()), Err(Error::WriterClosed)));
        assert!(matches!(
            writer.write_header(&Header::new(0, 0).unwrap()),
            Err(Error::WriterClosed)
        ));
        assert!(matches!(writer.close(), Err(Error::WriterClosed)));
        drop(writer);

        assert_eq!(buf.len(), 7 + 2 * 9);
    }

    #[test]
    fn record_before_header() {
        let mut writer = TemplateWriter::new(Vec::new());
        assert!(matches!(writer.write_record(&nop()), Err(Error::HeaderMissing)));
        assert!(matches!(writer.close(), Err(Error::HeaderMissing)));
        assert!(writer.get_ref().is_empty());
    }

    #[test]
    fn header_twice() {
        let mut writer = TemplateWriter::new(Vec::new());
        let header = Header::new(0, 0).unwrap();
        writer.write_header(&header).unwrap();
        assert!(matches!(
            writer.write_header(&header),
            Err(Error::HeaderAlreadyWritten)
        ));
    }

    #[test]
    fn more_records_than_declared() {
        let mut writer = TemplateWriter::new(Vec::new());
        writer.write_header(&Header::new(0, 1).unwrap()).unwrap();
        writer.write_record(&nop()).unwrap();
        assert!(matches!(
            writer.write_record(&nop()),
            Err(Error::CountMismatch {
                declared: 1,
                written: 2
            })
        ));
        assert_eq!(writer.get_ref().len(), 7 + 9);
    }

    #[test]
    fn fewer_records_than_declared() {
        let mut writer = TemplateWriter::new(Vec::new());
        writer.write_header(&Header::new(0, 2).unwrap()).unwrap();
        writer.write_record(&nop()).unwrap();
        assert!(matches!(
            writer.close(),
            Err(Error::CountMismatch {
                declared: 2,
                written: 1
            })
        ));
        assert_eq!(writer.state(), State::Closed);
    }
}
