fn main() {
    semtokens::cli::run();
}
