fn main() {
    fundalloc::app::cli::run();
}
