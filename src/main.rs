fn main() -> std::process::ExitCode {
    docpreview_lib::run()
}
