fn main() {
    mochi_lib::run()
}
