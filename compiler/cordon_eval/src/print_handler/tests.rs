use super::*;
use pretty_assertions::assert_eq;

#[test]
fn buffer_captures_writes_in_order() {
    let handler = buffer_handler();
    handler.write("hello");
    handler.write(" ");
    handler.println("world");
    assert_eq!(handler.output(), "hello world\n");
}

#[test]
fn buffer_clear_empties() {
    let handler = buffer_handler();
    handler.println("x");
    handler.clear();
    assert!(handler.output().is_empty());
}

#[test]
fn silent_and_stdout_capture_nothing() {
    let silent = silent_handler();
    silent.println("dropped");
    assert_eq!(silent.output(), "");

    let stdout = StdoutPrintHandler;
    stdout.write("");
    assert_eq!(stdout_handler().output(), "");
}

#[test]
fn handler_is_shareable_across_threads() {
    let handler = buffer_handler();
    let worker = Arc::clone(&handler);
    let joined = std::thread::spawn(move || worker.println("from thread")).join();
    assert!(joined.is_ok());
    assert_eq!(handler.output(), "from thread\n");
}
